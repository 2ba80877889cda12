//! Question sheet rendering.
//!
//! Questions are grouped section → difficulty → rows and serialized into
//! nested markup. Every render rebuilds the whole container.

use std::collections::{HashMap, HashSet};

use maud::{html, Markup, Render};

use crate::components::{Button, Form, FormGroup, Input, Select, SelectOption};
use crate::constants::ALL_SECTIONS;
use crate::models::{Difficulty, Question};

/// Questions of one section, bucketed by difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    pub name: &'a str,
    pub easy: Vec<&'a Question>,
    pub medium: Vec<&'a Question>,
    pub hard: Vec<&'a Question>,
}

impl<'a> SectionGroup<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            easy: Vec::new(),
            medium: Vec::new(),
            hard: Vec::new(),
        }
    }

    #[must_use]
    pub fn bucket(&self, difficulty: Difficulty) -> &[&'a Question] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn bucket_mut(&mut self, difficulty: Difficulty) -> &mut Vec<&'a Question> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Two-level grouping of a flat question list.
///
/// Sections keep the order in which they first appear; rows keep backend
/// order within their bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedQuestions<'a> {
    pub sections: Vec<SectionGroup<'a>>,
}

impl<'a> GroupedQuestions<'a> {
    /// Total number of grouped rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(SectionGroup::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionGroup<'a>> {
        self.sections.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn section_names(&self) -> Vec<&'a str> {
        self.sections.iter().map(|s| s.name).collect()
    }
}

/// Group questions by section, then difficulty.
#[must_use]
pub fn group_questions(questions: &[Question]) -> GroupedQuestions<'_> {
    let mut sections: Vec<SectionGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for question in questions {
        let slot = *index.entry(question.section.as_str()).or_insert_with(|| {
            sections.push(SectionGroup::new(&question.section));
            sections.len() - 1
        });
        sections[slot].bucket_mut(question.difficulty).push(question);
    }

    GroupedQuestions { sections }
}

/// Per-render view flags that are not part of the records themselves.
#[derive(Debug, Clone, Copy)]
pub struct SheetView<'a> {
    /// Rows with a status update in flight.
    pub loading: &'a HashSet<String>,
    /// Section to show, or [`ALL_SECTIONS`].
    pub section_filter: &'a str,
}

impl SheetView<'_> {
    fn is_visible(&self, section: &str) -> bool {
        self.section_filter == ALL_SECTIONS || self.section_filter == section
    }
}

/// Render the full `#sections-container`.
#[must_use]
pub fn render_sections(grouped: &GroupedQuestions<'_>, view: SheetView<'_>) -> Markup {
    html! {
        div id="sections-container" {
            @for section in &grouped.sections {
                section
                    class="dsa-section"
                    style=[(!view.is_visible(section.name)).then_some("display: none;")]
                {
                    h2 class="section-title" { (section.name) }
                    div class="difficulty-accordions" {
                        @for difficulty in Difficulty::ALL {
                            @let rows = section.bucket(difficulty);
                            @if !rows.is_empty() {
                                (render_difficulty_accordion(difficulty, rows, view.loading))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_difficulty_accordion(
    difficulty: Difficulty,
    rows: &[&Question],
    loading: &HashSet<String>,
) -> Markup {
    html! {
        details class="difficulty-details" {
            summary class=(format!("difficulty-summary {}", difficulty.css_class())) {
                (difficulty.as_str())
            }
            div class="questions-list" {
                @for q in rows {
                    (render_question_item(q, loading.contains(&q.id)))
                }
            }
        }
    }
}

/// Render one question row.
///
/// The checkbox posts the state it is switching to, so the hidden `done`
/// field is the negation of the current state.
#[must_use]
pub fn render_question_item(q: &Question, loading: bool) -> Markup {
    let item_class = if loading {
        "question-item loading"
    } else {
        "question-item"
    };
    let name_class = if q.done {
        "question-name done"
    } else {
        "question-name"
    };
    let next_state = if q.done { "false" } else { "true" };

    html! {
        div class=(item_class) data-id=(q.id) {
            form action="/dsa/toggle" method="post" class="question-toggle" {
                (Input::hidden("id", &q.id))
                (Input::hidden("done", next_state))
                input
                    type="checkbox"
                    class="question-check"
                    data-id=(q.id)
                    checked[q.done]
                    onchange="this.form.submit()";
            }
            p class=(name_class) { (q.name) }
            div class="question-links" {
                @for link in &q.question_link {
                    a href=(link) target="_blank" rel="noopener noreferrer" { "Link" }
                    " "
                }
            }
        }
    }
}

/// Placeholder shown while the list is being fetched.
#[must_use]
pub fn render_loading() -> Markup {
    html! {
        div id="sections-container" { p { "Loading questions..." } }
    }
}

/// Placeholder shown when the list could not be fetched.
#[must_use]
pub fn render_load_failed() -> Markup {
    html! {
        div id="sections-container" { p style="color:red;" { "Failed to load questions." } }
    }
}

/// Checked-question counts per difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl ProgressStats {
    #[must_use]
    pub fn from_questions(questions: &[Question]) -> Self {
        questions
            .iter()
            .filter(|q| q.done)
            .fold(Self::default(), |mut acc, q| {
                match q.difficulty {
                    Difficulty::Easy => acc.easy += 1,
                    Difficulty::Medium => acc.medium += 1,
                    Difficulty::Hard => acc.hard += 1,
                }
                acc
            })
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl Render for ProgressStats {
    fn render(&self) -> Markup {
        html! {
            div class="stats" {
                span id="stat-total" { "Total : " (self.total()) }
                span id="stat-easy" { "Easy : " (self.easy) }
                span id="stat-medium" { "Medium : " (self.medium) }
                span id="stat-hard" { "Hard : " (self.hard) }
            }
        }
    }
}

/// Dropdown that limits the sheet to one section.
#[must_use]
pub fn render_section_filter(sections: &[&str], selected: &str) -> Markup {
    let options = std::iter::once(SelectOption::new(ALL_SECTIONS, "All sections")).chain(
        sections
            .iter()
            .map(|name| SelectOption::new(*name, *name).class("sectionoption")),
    );

    Form::get(
        "/dsa/filter",
        html! {
            (Select::new("section")
                .id("filter-section")
                .options(options)
                .selected(selected)
                .submit_on_change())
            noscript { (Button::outline("Filter").r#type("submit")) }
        },
    )
    .class("section-filter")
    .render()
}

/// Form for adding a question to the shared list.
#[must_use]
pub fn render_question_form() -> Markup {
    let difficulty = Select::new("difficulty")
        .id("difficulty")
        .options(Difficulty::ALL.map(|d| SelectOption::new(d.as_str(), d.as_str())));

    Form::post(
        "/dsa/questions",
        html! {
            (FormGroup::new("Name", "name", Input::text("name").id("name").required().render()))
            (FormGroup::new(
                "Links (comma separated)",
                "questionLink",
                Input::text("questionLink")
                    .id("questionLink")
                    .placeholder("https://leetcode.com/problems/two-sum, https://...")
                    .required()
                    .render(),
            ))
            (FormGroup::new("Difficulty", "difficulty", difficulty.render()))
            (FormGroup::new("Section", "section", Input::text("section").id("section").required().render()))
            (Button::primary("Add question").r#type("submit"))
        },
    )
    .id("questionForm")
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, section: &str, difficulty: Difficulty, done: bool) -> Question {
        Question {
            id: id.to_string(),
            name: format!("Question {id}"),
            question_link: vec![format!("https://example.com/{id}")],
            section: section.to_string(),
            difficulty,
            done,
        }
    }

    #[test]
    fn test_grouping_keeps_every_question() {
        let questions = vec![
            q("1", "Arrays", Difficulty::Easy, false),
            q("2", "Graphs", Difficulty::Hard, false),
            q("3", "Arrays", Difficulty::Hard, true),
            q("4", "Arrays", Difficulty::Easy, false),
            q("5", "Graphs", Difficulty::Medium, false),
        ];
        let grouped = group_questions(&questions);

        assert_eq!(grouped.len(), questions.len());
        assert_eq!(grouped.section_names(), vec!["Arrays", "Graphs"]);

        let arrays = grouped.section("Arrays").unwrap();
        let easy_ids: Vec<&str> = arrays.easy.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(easy_ids, vec!["1", "4"]);
        assert_eq!(arrays.hard.len(), 1);
        assert!(arrays.medium.is_empty());

        let mut seen: Vec<&str> = grouped
            .sections
            .iter()
            .flat_map(|s| Difficulty::ALL.into_iter().flat_map(move |d| s.bucket(d).iter()))
            .map(|q| q.id.as_str())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_grouping_empty() {
        let grouped = group_questions(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.len(), 0);
    }

    #[test]
    fn test_single_easy_question_renders_unchecked() {
        let questions = vec![q("1", "Arrays", Difficulty::Easy, false)];
        let grouped = group_questions(&questions);
        let loading = HashSet::new();
        let html = render_sections(
            &grouped,
            SheetView {
                loading: &loading,
                section_filter: ALL_SECTIONS,
            },
        )
        .into_string();

        assert_eq!(html.matches(r#"class="dsa-section""#).count(), 1);
        assert!(html.contains(r#"<h2 class="section-title">Arrays</h2>"#));
        assert!(html.contains(r#"class="difficulty-summary easy""#));
        assert!(!html.contains("difficulty-summary medium"));
        assert_eq!(html.matches(r#"class="question-check""#).count(), 1);
        assert!(!html.contains("checked"));
        assert!(html.contains(r#"name="done" value="true""#));
    }

    #[test]
    fn test_done_question_is_checked_and_struck() {
        let item = render_question_item(&q("9", "Trees", Difficulty::Medium, true), false)
            .into_string();
        assert!(item.contains("checked"));
        assert!(item.contains(r#"class="question-name done""#));
        assert!(item.contains(r#"name="done" value="false""#));
        assert!(item.contains(r#"<input type="hidden" name="id" value="9">"#));
    }

    #[test]
    fn test_loading_row_class() {
        let item =
            render_question_item(&q("9", "Trees", Difficulty::Medium, false), true).into_string();
        assert!(item.contains(r#"class="question-item loading""#));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let mut question = q("1", "Arrays", Difficulty::Easy, false);
        question.question_link = vec!["https://a".to_string(), "https://b".to_string()];
        let item = render_question_item(&question, false).into_string();
        assert_eq!(item.matches(r#"target="_blank""#).count(), 2);
        assert!(item.contains(r#"href="https://b""#));
    }

    #[test]
    fn test_section_filter_hides_other_sections() {
        let questions = vec![
            q("1", "Arrays", Difficulty::Easy, false),
            q("2", "Graphs", Difficulty::Easy, false),
        ];
        let grouped = group_questions(&questions);
        let loading = HashSet::new();
        let html = render_sections(
            &grouped,
            SheetView {
                loading: &loading,
                section_filter: "Graphs",
            },
        )
        .into_string();

        assert_eq!(html.matches("display: none;").count(), 1);
        let hidden_at = html.find("display: none;").unwrap();
        let arrays_at = html.find(">Arrays<").unwrap();
        let graphs_at = html.find(">Graphs<").unwrap();
        assert!(hidden_at < arrays_at && arrays_at < graphs_at);
    }

    #[test]
    fn test_names_are_escaped() {
        let mut question = q("1", "Arrays", Difficulty::Easy, false);
        question.name = "<img onerror=x>".to_string();
        let item = render_question_item(&question, false).into_string();
        assert!(item.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn test_progress_stats() {
        let questions = vec![
            q("1", "A", Difficulty::Easy, true),
            q("2", "A", Difficulty::Easy, false),
            q("3", "A", Difficulty::Hard, true),
            q("4", "B", Difficulty::Medium, true),
        ];
        let stats = ProgressStats::from_questions(&questions);
        assert_eq!(
            stats,
            ProgressStats {
                easy: 1,
                medium: 1,
                hard: 1
            }
        );
        assert_eq!(stats.total(), 3);
        assert!(stats.render().into_string().contains("Total : 3"));
    }

    #[test]
    fn test_section_filter_options() {
        let html = render_section_filter(&["Arrays", "Graphs"], "Graphs").into_string();
        assert!(html.contains(r#"<option value="ALL">All sections</option>"#));
        assert!(html.contains(r#"<option value="Graphs" class="sectionoption" selected>Graphs</option>"#));
        assert!(html.contains(r#"id="filter-section""#));
    }

    #[test]
    fn test_question_form_fields() {
        let html = render_question_form().into_string();
        for field in ["name", "questionLink", "difficulty", "section"] {
            assert!(html.contains(&format!(r#"name="{field}""#)), "missing {field}");
        }
        assert!(html.contains(r#"id="questionForm""#));
    }
}
