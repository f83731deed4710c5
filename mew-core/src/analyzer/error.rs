use crate::utils::prelude::SrcSpan;

/// Static findings. None of them stop a program from running.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Warning {
    /// A name is assigned somewhere but never read anywhere.
    ///
    /// ```text
    /// m = mew;    <- `m` is never used
    /// ::mewmew;
    /// ```
    UnusedVariable {
        location: SrcSpan,
        name: String,
    },
    /// The condition folds to something other than `1`.
    UnreachableIfClause {
        location: SrcSpan
    },
    /// The condition folds to exactly `1`.
    UnreachableElseClause {
        location: SrcSpan
    },
    /// The repeat count folds to less than one.
    UnreachableLoopBody {
        location: SrcSpan
    },
}

impl Warning {
    pub fn location(&self) -> SrcSpan {
        match self {
            Warning::UnusedVariable { location, .. }
            | Warning::UnreachableIfClause { location }
            | Warning::UnreachableElseClause { location }
            | Warning::UnreachableLoopBody { location } => *location
        }
    }
}
