mod receipt;

pub use receipt::{
    load_receipt, prompt_fingerprint, write_receipt, ReceiptArtifact, ReceiptRequest,
    RunReceipt, RECEIPT_SCHEMA_VERSION,
};
