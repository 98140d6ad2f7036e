use crate::behaviors::Attached;
use crate::config::SpinnerConfig;
use crate::error::PageError;
use crate::host::{Bindings, Host, Region};

pub const NAME: &str = "loading spinner";

const SPINNER_CSS: &str = r#"
.loading-spinner {
  position: fixed;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  background: rgba(255, 255, 255, 0.9);
  display: flex;
  flex-direction: column;
  justify-content: center;
  align-items: center;
  z-index: 9999;
}

.spinner {
  width: 50px;
  height: 50px;
  border: 5px solid #f3f3f3;
  border-top: 5px solid #007A3D;
  border-radius: 50%;
  animation: spin 1s linear infinite;
}

@keyframes spin {
  0% { transform: rotate(0deg); }
  100% { transform: rotate(360deg); }
}
"#;

/// Covers the page with a spinner until the window has loaded, then removes it after
/// `removal_delay_ms`.
pub fn show<H: Host>(host: &H, config: &SpinnerConfig) -> Result<Attached, PageError> {
    let style = host.create_element("style")?;
    host.set_text_content(&style, SPINNER_CSS);

    let loader = host.create_element("div")?;
    host.set_class_name(&loader, "loading-spinner");
    host.set_inner_html(
        &loader,
        &format!(
            r#"<div class="spinner"></div><p>{}</p>"#,
            escape_html(&config.message)
        ),
    );

    host.append(Region::Head, &style)?;
    host.append(Region::Body, &loader)?;

    let handler_host = host.clone();
    let delay = config.removal_delay_ms;
    let listener = host.on_load(Box::new(move || {
        let remover = handler_host.clone();
        handler_host
            .set_timeout(delay, Box::new(move || remover.remove(&loader)))
            .forget();
    }))?;

    Ok(Attached::new(NAME, 1, Bindings::from(vec![listener])))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
