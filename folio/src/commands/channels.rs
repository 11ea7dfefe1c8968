use folio_config::ContactConfig;

/// Renders the alternative contact channels, one per line.
pub fn render(config: &ContactConfig) -> String {
    let width = config
        .channels
        .iter()
        .map(|channel| channel.label.chars().count())
        .max()
        .unwrap_or_default();

    config
        .channels
        .iter()
        .map(|channel| {
            format!(
                "{:width$}  {}  <{}>\n",
                channel.label, channel.value, channel.href
            )
        })
        .chain(config.location.iter().map(|location| format!("{location}\n")))
        .collect()
}
