//! Case selection for a single planning run.

/// Literal case id that selects every case in the topology file.
pub const ALL_CASES: &str = "all";

/// Which case records a run should process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Requested ids in first-request order; matched ids are removed.
    Explicit(Vec<String>),
}

impl Selection {
    /// Build a selection from raw command-line ids.
    ///
    /// An empty list, or any list containing `all`, selects every case.
    /// Duplicate ids are collapsed.
    pub fn from_case_list<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requested: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if id == ALL_CASES {
                return Selection::All;
            }
            if !requested.contains(&id) {
                requested.push(id);
            }
        }
        if requested.is_empty() {
            Selection::All
        } else {
            Selection::Explicit(requested)
        }
    }

    /// Claim `case_id` for processing.
    ///
    /// Returns false when the case is not selected. An explicit selection
    /// forgets the id once claimed, so a later record with the same id is
    /// skipped.
    pub fn take(&mut self, case_id: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Explicit(requested) => {
                match requested.iter().position(|id| id == case_id) {
                    Some(idx) => {
                        requested.remove(idx);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Requested ids that were never matched. Always empty for `All`.
    pub fn remaining(&self) -> &[String] {
        match self {
            Selection::All => &[],
            Selection::Explicit(requested) => requested,
        }
    }
}
