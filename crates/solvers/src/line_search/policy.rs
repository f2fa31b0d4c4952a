use super::{
    Backtracking, Constant, Exact, Goldstein, LineFunction, LineSearch, Step, StrongWolfe,
};

/// Runtime choice of line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    StrongWolfe(StrongWolfe),
    Backtracking(Backtracking),
    Goldstein(Goldstein),
    Exact(Exact),
    Constant(Constant),
}

impl Default for Policy {
    fn default() -> Self {
        Policy::StrongWolfe(StrongWolfe::default())
    }
}

impl LineSearch for Policy {
    fn search<L: LineFunction>(&mut self, line: &mut L) -> Result<Step, L::Error> {
        match self {
            Policy::StrongWolfe(search) => search.search(line),
            Policy::Backtracking(search) => search.search(line),
            Policy::Goldstein(search) => search.search(line),
            Policy::Exact(search) => search.search(line),
            Policy::Constant(search) => search.search(line),
        }
    }

    fn reset(&mut self) {
        match self {
            Policy::StrongWolfe(search) => search.reset(),
            Policy::Backtracking(search) => search.reset(),
            Policy::Goldstein(search) => search.reset(),
            Policy::Exact(search) => search.reset(),
            Policy::Constant(search) => search.reset(),
        }
    }
}

impl From<StrongWolfe> for Policy {
    fn from(search: StrongWolfe) -> Self {
        Policy::StrongWolfe(search)
    }
}

impl From<Backtracking> for Policy {
    fn from(search: Backtracking) -> Self {
        Policy::Backtracking(search)
    }
}

impl From<Goldstein> for Policy {
    fn from(search: Goldstein) -> Self {
        Policy::Goldstein(search)
    }
}

impl From<Exact> for Policy {
    fn from(search: Exact) -> Self {
        Policy::Exact(search)
    }
}

impl From<Constant> for Policy {
    fn from(search: Constant) -> Self {
        Policy::Constant(search)
    }
}
