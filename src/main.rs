use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    notebook_chat::cli::main()
}
