use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
            Deserialize,
        )]
        pub struct $name(pub i64);

        impl $name {
            /// Zero until storage assigns a real identifier on save.
            pub const UNASSIGNED: Self = Self(0);

            pub fn new(raw: i64) -> Self {
                Self(raw)
            }
            pub fn as_i64(&self) -> i64 {
                self.0
            }
            pub fn is_unassigned(&self) -> bool {
                self.0 == 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CommentId);
id_newtype!(TicketId);
id_newtype!(UserId);
id_newtype!(EventId);
