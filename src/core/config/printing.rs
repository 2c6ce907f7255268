use crate::cli::settings::SettingRegistry;
use crate::core::config::data::Config;

impl Config {
    /// One line per known setting, in registry display order.
    pub fn describe_all(&self) -> Vec<String> {
        let registry = SettingRegistry::new();
        registry
            .keys_display_order()
            .iter()
            .filter_map(|key| registry.get(key))
            .map(|handler| handler.format(self))
            .collect()
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.describe_all() {
            println!("{line}");
        }
    }
}
