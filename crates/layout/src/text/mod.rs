//! Text block renderers: paragraphs, bulleted items and inline label/value
//! lists. Each measures its content, reserves space through the controller,
//! draws, then advances the cursor by the measured height plus spacing.

mod list;
mod paragraph;

pub use list::{ListOptions, bullet_item, key_value_list};
pub use paragraph::{ParagraphOptions, flow_text, notice, paragraph};
