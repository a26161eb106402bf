use pulldown_cmark::{html, Event as MdEvent, Options, Parser};
use yew::{AttrValue, Html};

pub fn set_panic_hook() {
    // Panics show up in the browser console with a readable message
    // instead of "unreachable executed".
    console_error_panic_hook::set_once();
}

pub fn render_markdown(text: &str) -> Html {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        MdEvent::SoftBreak => MdEvent::HardBreak,
        // Plan text comes from the API; never let it inject markup.
        MdEvent::Html(raw) => MdEvent::Text(raw),
        _ => event,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let styled_html = format!(r#"<div class="markdown-body">{}</div>"#, html_output);
    Html::from_html_unchecked(AttrValue::from(styled_html))
}

pub const DARK_MODE_QUERY: &str = "(prefers-color-scheme: dark)";

pub fn dark_mode_query() -> Option<web_sys::MediaQueryList> {
    web_sys::window()?.match_media(DARK_MODE_QUERY).ok()?
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
