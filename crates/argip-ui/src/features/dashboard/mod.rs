//! Landing page behind the shell.

pub mod view;
