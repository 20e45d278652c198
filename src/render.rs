//! Static SVG rendering of a positioned tree.
//!
//! Draw order matters: relationship lines go down first so cards sit on top
//! of them, matching how the connecting segments visually terminate at card
//! edges rather than card centers.

use anyhow::Result;
use std::path::Path;

use crate::config::LayoutConfig;
use crate::dates;
use crate::ir::Person;
use crate::layout::{self, EdgeSet};
use crate::theme::Theme;

pub fn render_svg(
    persons: &[Person],
    edges: &EdgeSet,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let bounds = layout::bounds(persons, config);
    let margin = 40.0;
    let width = (bounds.max_x - bounds.min_x + 2.0 * margin).max(200.0);
    let height = (bounds.max_y - bounds.min_y + 2.0 * margin).max(200.0);
    let view_x = bounds.min_x - margin;
    let view_y = bounds.min_y - margin;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"{view_x:.2} {view_y:.2} {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{view_x:.2}\" y=\"{view_y:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for marriage in &edges.marriage_lines {
        for path in [&marriage.path_a, &marriage.path_b] {
            svg.push_str(&format!(
                "<path d=\"{path}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" opacity=\"0.8\"/>",
                theme.marriage_line
            ));
        }
    }

    for parent_child in &edges.parent_child_lines {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" opacity=\"0.7\"/>",
            parent_child.path, theme.parent_child_line
        ));
    }

    for line in &edges.sibling_lines {
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1.5\" opacity=\"0.7\"/>",
            line.x1, line.y1, line.x2, line.y2, theme.sibling_line
        ));
    }

    for person in persons {
        svg.push_str(&card_svg(person, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn card_svg(person: &Person, theme: &Theme, config: &LayoutConfig) -> String {
    let colors = theme.card_colors(person.sex);
    let (fill, border) = if person.is_uncertain {
        (theme.uncertain_fill.as_str(), theme.uncertain_border.as_str())
    } else {
        (colors.fill.as_str(), colors.border.as_str())
    };
    let x = person.x - config.card_width / 2.0;
    let y = person.y - config.card_height / 2.0;

    let mut card = format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{fill}\" stroke=\"{border}\" stroke-width=\"1.5\"/>",
        config.card_width, config.card_height, config.corner_radius, config.corner_radius
    );
    // Sex indicator strip along the card top.
    card.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"4\" rx=\"2\" fill=\"{}\"/>",
        config.card_width, colors.indicator
    ));
    card.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
        person.x,
        person.y,
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(&person.display_name)
    ));

    let lifespan = lifespan_text(person);
    if !lifespan.is_empty() {
        card.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" opacity=\"0.7\">{}</text>",
            person.x,
            person.y + theme.font_size + 4.0,
            theme.font_family,
            theme.font_size - 2.0,
            theme.text_color,
            escape_xml(&lifespan)
        ));
    }

    card
}

fn lifespan_text(person: &Person) -> String {
    let birth = person.birth.date.as_deref().map(dates::format_for_display);
    let death = person.death.date.as_deref().map(dates::format_for_display);
    match (birth, death) {
        (Some(b), Some(d)) => format!("{b} - {d}"),
        (Some(b), None) => format!("{b} -"),
        (None, Some(d)) => format!("- {d}"),
        (None, None) => String::new(),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{svg}");
        }
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FamilyUnit, PersonName, RelationType, Sex};
    use crate::layout::{compute_layout, derive_edges, OverrideMap};

    #[test]
    fn render_svg_basic() {
        let mut persons = vec![
            Person::new(
                "a",
                1,
                Sex::Male,
                PersonName {
                    surname: "Sato".to_string(),
                    given_name: "Taro <1>".to_string(),
                },
            ),
            Person::new("b", 1, Sex::Female, PersonName::default()),
        ];
        persons[1].is_uncertain = true;
        let families = vec![FamilyUnit {
            id: "f1".to_string(),
            parents: vec!["a".to_string(), "b".to_string()],
            children: vec![],
            marriage_date: None,
            divorce_date: None,
            relation_type: RelationType::Blood,
        }];
        let config = LayoutConfig::default();
        let theme = Theme::default();
        let placed = compute_layout(&persons, &families, &OverrideMap::new(), &config);
        let edges = derive_edges(&placed, &families, &config);
        let svg = render_svg(&placed, &edges, &theme, &config);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        // Name is XML-escaped, both marriage strokes are present, and the
        // uncertain card gets the uncertainty fill.
        assert!(svg.contains("Taro &lt;1&gt;"));
        assert_eq!(svg.matches(&theme.marriage_line).count(), 2);
        assert!(svg.contains(&theme.uncertain_fill));
    }

    #[test]
    fn lifespan_renders_partial_dates() {
        let mut person = Person::new("a", 1, Sex::Unknown, PersonName::default());
        person.birth.date = Some("1920-XX-XX".to_string());
        assert_eq!(lifespan_text(&person), "1920 -");
        person.death.date = Some("1990-04-01".to_string());
        assert_eq!(lifespan_text(&person), "1920 - 1990-04-01");
    }
}
