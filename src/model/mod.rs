mod catalog;
mod recipe_entry;

pub use catalog::Catalog;
pub use recipe_entry::RecipeEntry;
