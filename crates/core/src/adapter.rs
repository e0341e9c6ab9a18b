use crate::{Result, Statement};

/// Single-statement execution, the capability every backend has.
pub trait DatabaseAdapter {
    fn statement(&mut self, statement: &Statement) -> Result<()>;

    /// The batch entry point, for backends that can run one table's
    /// statements in a single operation.
    fn as_batch(&mut self) -> Option<&mut dyn BatchAdapter> {
        None
    }
}

pub trait BatchAdapter {
    fn statements(&mut self, statements: &[Statement]) -> Result<()>;
}
