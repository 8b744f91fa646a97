//! HTML → plain text.

/// Strip HTML tags and collapse whitespace.
///
/// Content of `<script>` and `<style>` elements is dropped along with the tags.
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag = String::new();
    let mut skipping: Option<&'static str> = None;

    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag_name(&tag);
                match skipping {
                    Some(closing) if name == closing => skipping = None,
                    Some(_) => {}
                    None if name == "script" => skipping = Some("/script"),
                    None if name == "style" => skipping = Some("/style"),
                    // Block-level boundaries become whitespace.
                    None => result.push(' '),
                }
            }
            _ if in_tag => tag.push(ch),
            _ if skipping.is_none() => result.push(ch),
            _ => {}
        }
    }

    decode_entities(&result.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Lowercased element name, keeping a leading `/` for closing tags.
fn tag_name(tag: &str) -> String {
    tag.trim()
        .split(|c: char| c.is_whitespace() || c == '>')
        .next()
        .unwrap_or("")
        .trim_end_matches('/')
        .to_lowercase()
}

/// Decode the handful of entities common in email bodies.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
