// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single-file HTML report.

use std::fmt::Write as _;

use crate::svg::escape_xml;

/// One titled block of the report.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) svg: String,
}

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; background: #FAFAF8; color: #0B241C; margin: 32px; }
section { background: #FFFFFF; border: 1px solid #E8E8E5; border-radius: 12px; padding: 24px; margin-bottom: 24px; }
h1 { font-size: 28px; margin: 0 0 24px; }
h2 { font-size: 16px; margin: 0 0 4px; }
p { font-size: 13px; color: #4A7561; margin: 0 0 16px; }
svg { max-width: 100%; height: auto; }
footer { text-align: center; font-size: 13px; color: #9AB3A9; }
";

/// Renders `sections` into a standalone HTML page.
pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let title = escape_xml(title);
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">\n<title>{title}</title>");
    let _ = writeln!(out, "<style>\n{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(out, "<h1>{title}</h1>");
    for section in sections {
        let _ = writeln!(
            out,
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n{}</section>",
            escape_xml(section.title),
            escape_xml(section.description),
            section.svg
        );
    }
    let _ = writeln!(
        out,
        "<footer>Run <code>verdant_catalogue copy &lt;ramp/name&gt;</code> to copy a hex value</footer>"
    );
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_embeds_every_section() {
        let sections = [
            HtmlSection {
                title: "Primary",
                description: "Forest ramp",
                svg: "<svg id=\"a\"></svg>\n".into(),
            },
            HtmlSection {
                title: "Stacked & grouped",
                description: "Bars",
                svg: "<svg id=\"b\"></svg>\n".into(),
            },
        ];
        let html = render_report("Verdant", &sections);
        assert!(html.starts_with("<!DOCTYPE html>"), "standalone page");
        assert_eq!(html.matches("<section>").count(), 2, "one block per section");
        assert!(html.contains("<svg id=\"b\">"), "svg is embedded verbatim");
        assert!(html.contains("Stacked &amp; grouped"), "titles are escaped");
    }
}
