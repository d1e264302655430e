/// Checks invariants that serde cannot express, e.g. a cell size that
/// must divide the board dimensions.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
