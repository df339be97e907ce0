//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Generation job execution status.
    ///
    /// Transitions are monotonic: Pending -> Processing -> Completed or
    /// Failed. Terminal states are final.
    JobStatus {
        Pending = 1,
        Processing = 2,
        Completed = 3,
        Failed = 4,
    }
}

define_status_enum! {
    /// Review status of a staged artifact.
    ///
    /// Rejected is only ever observed on image rows: rejected FAQ and
    /// content rows are deleted instead of retained.
    ReviewStatus {
        Pending = 1,
        Accepted = 2,
        Rejected = 3,
    }
}

impl JobStatus {
    /// True for statuses no transition leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_status_ids_match_seed_data() {
        assert_eq!(JobStatus::Pending.id(), 1);
        assert_eq!(JobStatus::Processing.id(), 2);
        assert_eq!(JobStatus::Completed.id(), 3);
        assert_eq!(JobStatus::Failed.id(), 4);
    }

    #[test]
    fn review_status_ids_match_seed_data() {
        assert_eq!(ReviewStatus::Pending.id(), 1);
        assert_eq!(ReviewStatus::Accepted.id(), 2);
        assert_eq!(ReviewStatus::Rejected.id(), 3);
    }

    #[test]
    fn terminal_job_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = ReviewStatus::Accepted.into();
        assert_eq!(id, 2);
    }
}
