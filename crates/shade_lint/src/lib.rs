//! shade_lint: Declaration-shadowing analysis over a resolved scope tree.
//!
//! For every binding the analysis finds the nearest enclosing binding of
//! the same name and decides, under [`NoShadowOptions`], whether the inner
//! declaration shadows it. The pass is a pure function of the tree and the
//! options: the tree is never mutated and the only output is the ordered
//! sequence of [`ShadowReport`]s.

mod exclusion;
mod policy;
mod reporter;
mod resolver;
mod rule;

pub use exclusion::{is_excluded, Exclusion};
pub use policy::{Gate, Policy, Verdict};
pub use reporter::{render, render_all, Reporter, ShadowReport};
pub use resolver::find_enclosing;
pub use rule::{check_no_shadow, NoShadow};

pub use shade_options::{HoistMode, NoShadowOptions};
