//! View descriptions: the node tree, Plotly figures, shared widgets

pub mod components;
pub mod figure;
pub mod node;
pub mod theme;

pub use figure::Figure;
pub use node::{div, escape, heading, img, paragraph, span, Element, Node, Style};
