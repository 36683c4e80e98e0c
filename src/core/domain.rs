use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

// SchemaRevision is the versioned schema contract for the pet table. The legacy
// deployment stored free-text notes under a suffixed column; the revision pins
// which attribute name this process reads and writes. Nothing probes at runtime.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum SchemaRevision {
    V1,
    V2,
}

impl SchemaRevision {
    pub fn notes_attribute(&self) -> &'static str {
        match self {
            SchemaRevision::V1 => "observations",
            SchemaRevision::V2 => "observations_m",
        }
    }
}

// Configuration abstracts config options for the clinic administration service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub clinic_id: String,
    pub pets_table: String,
    pub breeds_table: String,
    pub sessions_table: String,
    pub photos_table: String,
    pub photos_bucket: String,
    pub photos_prefix: String,
    pub photos_region: String,
    pub schema: SchemaRevision,
}

impl Configuration {
    pub fn new(clinic_id: &str) -> Self {
        Configuration {
            clinic_id: clinic_id.to_string(),
            pets_table: "pets".to_string(),
            breeds_table: "breeds".to_string(),
            sessions_table: "sessions".to_string(),
            photos_table: "photos".to_string(),
            photos_bucket: "vetclinic-photos".to_string(),
            photos_prefix: "pets".to_string(),
            photos_region: "us-east-1".to_string(),
            schema: SchemaRevision::V1,
        }
    }
}
