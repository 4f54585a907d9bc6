// LinkStash state managers
// The list controller owns the saved items; the list handle shares it safely.

pub mod list_controller;
pub mod list_handle;
