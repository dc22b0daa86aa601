//! String identifiers for world entities.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Reference data key for an item, e.g. "comp_steel_plate".
    ItemId
);
string_id!(
    /// Building id of the form "{KIND}-{ordinal}", e.g. "FACTORY-1".
    BuildingId
);
string_id!(
    /// Truck id, e.g. "truck-3".
    TruckId
);
string_id!(
    /// Contract id, e.g. "contract-12".
    ContractId
);
string_id!(
    /// Id of an employee on the payroll.
    EmployeeId
);
string_id!(
    /// Id of a hireable candidate in the current recruitment report.
    CandidateId
);
