//! View renderer: pure transformations from records to markup.

pub mod pages;
pub mod posts;
pub mod questions;

pub use posts::{format_created_at, post_detail_url, render_post, render_posts};
pub use questions::{
    group_questions, render_load_failed, render_loading, render_question_form,
    render_question_item, render_section_filter, render_sections, GroupedQuestions,
    ProgressStats, SectionGroup, SheetView,
};
