pub mod actions;
pub mod commands;
pub mod graph;
pub mod manifest;
pub mod validation;
pub mod walk;

#[cfg(test)]
mod test_support;
