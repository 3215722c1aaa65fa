use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}
