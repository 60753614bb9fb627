// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_article(sections: usize) -> String {
    let mut content = String::from("'''Sol''' is the [[star]] at the centre of the [[Solar System]].\n");

    for section in 0..sections {
        content.push_str(&format!("\n== Section {} ==\n", section));
        content.push_str(&format!(
            "Paragraph {} mentions the [[Sun|sun]] and its {{{{convert|{}|km}}}} radius.<ref>Source {}</ref>\n",
            section,
            section * 1000,
            section
        ));
        content.push_str("Some plain prose follows, long enough to look like a real paragraph &amp; more.\n");

        // Add a table occasionally
        if section % 4 == 0 {
            content.push_str("{|\n! Body !! Radius\n|-\n| [[Earth]] || 6371\n|-\n| [[Mars]] || 3389\n|}\n");
        }
    }

    content
}

/// An excerpt from the rendered text of the last section.
#[allow(dead_code)]
pub fn last_section_excerpt(sections: usize) -> String {
    format!(
        "Paragraph {} mentions the sun and its",
        sections.saturating_sub(1)
    )
}

#[allow(dead_code)]
pub fn generate_revision(original: &str) -> String {
    original
        .replace("plain prose", "plain, revised prose")
        .replace("real paragraph", "genuine paragraph")
}
