//! HTML rendering of the navigation bar and the result summary.

use maud::{html, Markup};

use crate::models::pagination::{LinkDescriptor, LinkKind, PaginationState, ResultSummary};

/// Link titles and captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub forward: String,
    pub previous: String,
    pub last: String,
    pub first: String,
    pub next: String,
    pub back: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Page ".to_string(),
            forward: "Forward by ".to_string(),
            previous: "Back by ".to_string(),
            last: "Last page ".to_string(),
            first: "First page ".to_string(),
            next: "Next ".to_string(),
            back: "Back ".to_string(),
        }
    }
}

/// CSS class names for the container and the non-link elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssClasses {
    pub container: String,
    pub current: String,
    pub disabled: String,
}

impl Default for CssClasses {
    fn default() -> Self {
        Self {
            container: "pagination".to_string(),
            current: "current".to_string(),
            disabled: "disabled".to_string(),
        }
    }
}

/// Immutable renderer settings, built once and shared across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    pub labels: Labels,
    pub classes: CssClasses,
    /// Base URL of the paginated page.
    pub return_url: String,
    /// Extra query string placed before the page parameter, e.g. `?sort=name`.
    pub link_query: String,
}

impl RenderConfig {
    /// URL of `page`.
    pub fn page_url(&self, page: i64) -> String {
        if self.link_query.is_empty() {
            format!("{}?page={page}", self.return_url)
        } else {
            format!("{}{}&page={page}", self.return_url, self.link_query)
        }
    }

    fn anchor(&self, page: i64, title: &str, text: &str) -> Markup {
        html! {
            " "
            a data-page=(page) href=(self.page_url(page)) title=(title) { (text) }
            " "
        }
    }

    fn disabled(&self, text: &str) -> Markup {
        html! {
            span class=(self.classes.disabled) { (text) }
        }
    }

    fn element(&self, state: &PaginationState, link: &LinkDescriptor) -> Markup {
        let labels = &self.labels;
        let back = format!("« {}", labels.back);
        let next = format!("{} »", labels.next);

        let target = match link.target {
            Some(target) if !link.disabled => target,
            _ => {
                return match link.kind {
                    LinkKind::Prev => self.disabled(&back),
                    LinkKind::Next => self.disabled(&next),
                    _ => html! {},
                }
            }
        };

        match link.kind {
            LinkKind::First => self.anchor(target, &labels.first, &target.to_string()),
            LinkKind::Last => self.anchor(target, &labels.last, &target.to_string()),
            LinkKind::Prev => self.anchor(target, &format!("{}{target}", labels.title), &back),
            LinkKind::Next => self.anchor(target, &format!("{}{target}", labels.title), &next),
            LinkKind::SkipLeft => {
                let jump = state.current_page() - target;
                self.anchor(target, &format!("{}{jump}", labels.previous), "...")
            }
            LinkKind::SkipRight => {
                let jump = target - state.current_page();
                self.anchor(target, &format!("{}{jump}", labels.forward), "...")
            }
            LinkKind::Page => self.anchor(
                target,
                &format!("{}{target}", labels.title),
                &target.to_string(),
            ),
            LinkKind::Current => html! {
                span class=(self.classes.current) { (target) }
            },
        }
    }

    /// Markup of the navigation bar for `links`.
    pub fn render_links(&self, state: &PaginationState, links: &[LinkDescriptor]) -> String {
        html! {
            div class=(self.classes.container) {
                @for link in links {
                    (self.element(state, link))
                }
            }
        }
        .into_string()
    }

    /// Markup of the "from - to / total" line.
    pub fn render_summary(&self, summary: &ResultSummary) -> String {
        let markup = if summary.total == 0 {
            html! { "0 / " span { "0" } }
        } else {
            html! {
                span { (summary.from) } " - " span { (summary.to) }
                " / " span { (format_thousands(summary.total)) }
            }
        };
        markup.into_string()
    }
}

/// Format `value` with `,` between groups of three digits.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
