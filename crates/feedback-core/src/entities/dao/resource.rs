/// The columns of the host catalog's `resource` row this crate reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub id: String,
    pub package_id: String,
    /// Location of the file; `None` for resources without an upload.
    pub url: Option<String>,
}
