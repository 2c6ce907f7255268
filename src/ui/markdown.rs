use pulldown_cmark::{html, CowStr, Event, Options, Parser};

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_GFM);
    options
}

/// Render markdown text to an HTML fragment.
///
/// Raw HTML embedded in the markdown is shown as literal text, never passed
/// through to the page.
pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new_ext(content, markdown_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });

    let mut out = String::with_capacity(content.len() + content.len() / 2);
    html::push_html(&mut out, parser);
    out
}
