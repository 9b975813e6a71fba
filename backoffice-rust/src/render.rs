use crate::messages;
use portfolio_sdk::{escape_html, Project};

const MAX_IMAGE_BADGES: usize = 3;

/// What a project card shows besides title, description and technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOptions {
    /// Show the first image as a preview at the top of the card.
    pub image_preview: bool,
    /// Show one `img` badge per image, up to three.
    pub image_badges: bool,
    /// Link to the repository when the project has one.
    pub repository_link: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            image_preview: true,
            image_badges: true,
            repository_link: true,
        }
    }
}

/// Markup of the project list container.
///
/// An empty list renders a single placeholder card without actions. Every
/// interpolated value is escaped.
#[must_use]
pub fn render_projects(projects: &[Project], options: CardOptions) -> String {
    if projects.is_empty() {
        return format!(
            r#"<div class="card"><p>{}</p></div>"#,
            messages::NO_PROJECTS
        );
    }

    projects
        .iter()
        .map(|project| render_card(project, options))
        .collect()
}

fn render_card(project: &Project, options: CardOptions) -> String {
    let mut card = String::from(r#"<div class="card">"#);

    if options.image_preview {
        if let Some(first) = project.images.first().filter(|url| !url.is_empty()) {
            card.push_str(&format!(
                r#"<img src="{}" alt="preview" class="preview">"#,
                escape_html(first)
            ));
        }
    }

    card.push_str(&format!(
        "<h3>{}</h3><p>{}</p>",
        escape_html(&project.title),
        escape_html(&project.description)
    ));

    let technologies = project
        .technologies
        .iter()
        .map(|technology| format!(r#"<span class="badge">{}</span>"#, escape_html(technology)))
        .collect::<String>();
    card.push_str(&format!(r#"<div class="badges">{technologies}</div>"#));

    if options.repository_link {
        if let Some(repository) = project.repository.as_deref().filter(|r| !r.is_empty()) {
            let repository = escape_html(repository);
            card.push_str(&format!(
                r#"<a href="{repository}" target="_blank" rel="noopener noreferrer" class="meta">{repository}</a>"#
            ));
        }
    }

    if options.image_badges && !project.images.is_empty() {
        let badges = r#"<span class="badge">img</span>"#
            .repeat(project.images.len().min(MAX_IMAGE_BADGES));
        card.push_str(&format!(r#"<div class="badges">{badges}</div>"#));
    }

    let id = escape_html(&project.id);
    card.push_str(&format!(
        r#"<div class="card-actions"><button class="btn ghost" data-edit="{id}">{}</button><button class="btn danger" data-del="{id}">{}</button></div>"#,
        messages::EDIT_ACTION,
        messages::DELETE_ACTION
    ));

    card.push_str("</div>");
    card
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: "p1".into(),
            title: "Site".into(),
            description: "Landing".into(),
            technologies: vec!["Go".into(), "Rust".into()],
            repository: Some("https://github.com/a/site".into()),
            images: vec![
                "https://img/1.png".into(),
                "https://img/2.png".into(),
                "https://img/3.png".into(),
                "https://img/4.png".into(),
            ],
        }
    }

    #[test]
    fn empty_list_renders_one_placeholder_without_actions() {
        let html = render_projects(&[], CardOptions::default());
        assert_eq!(html.matches(r#"class="card""#).count(), 1);
        assert!(html.contains("Sin proyectos"));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn card_shows_all_parts_by_default() {
        let html = render_projects(&[project()], CardOptions::default());
        assert!(html.contains(r#"<img src="https://img/1.png" alt="preview""#));
        assert!(html.contains("<h3>Site</h3><p>Landing</p>"));
        assert!(html.contains(r#"<span class="badge">Go</span><span class="badge">Rust</span>"#));
        assert!(html.contains(r#"href="https://github.com/a/site""#));
        assert_eq!(html.matches(r#"<span class="badge">img</span>"#).count(), 3);
        assert!(html.contains(r#"data-edit="p1""#));
        assert!(html.contains(r#"data-del="p1""#));
    }

    #[test]
    fn card_options_turn_parts_off() {
        let options = CardOptions {
            image_preview: false,
            image_badges: false,
            repository_link: false,
        };
        let html = render_projects(&[project()], options);
        assert!(!html.contains("<img"));
        assert!(!html.contains("<a "));
        assert!(!html.contains(">img<"));
        assert!(html.contains("data-edit"));
    }

    #[test]
    fn user_text_is_escaped() {
        let project = Project {
            id: r#"x"><script>"#.into(),
            title: "<b>Bold</b>".into(),
            description: "Tom & Jerry's".into(),
            technologies: vec!["C<>".into()],
            repository: Some(r#"javascript:alert("x")"#.into()),
            images: vec![r#"" onerror="x"#.into()],
        };
        let html = render_projects(&[project], CardOptions::default());
        assert!(html.contains("<h3>&lt;b&gt;Bold&lt;/b&gt;</h3>"));
        assert!(html.contains("<p>Tom &amp; Jerry&#39;s</p>"));
        assert!(html.contains("C&lt;&gt;"));
        assert!(html.contains(r#"data-del="x&quot;&gt;&lt;script&gt;""#));
        assert!(html.contains(r#"href="javascript:alert(&quot;x&quot;)""#));
        assert!(html.contains(r#"src="&quot; onerror=&quot;x""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn one_card_per_project() {
        let mut second = project();
        second.id = "p2".into();
        second.images.clear();
        second.repository = None;
        let html = render_projects(&[project(), second], CardOptions::default());
        assert_eq!(html.matches(r#"<div class="card">"#).count(), 2);
        assert_eq!(html.matches("<button").count(), 4);
        assert_eq!(html.matches("<img").count(), 1);
    }
}
