//! Matrix decompositions.
//!
//! | Decomposition | Module  | Factorization |
//! |---------------|---------|---------------|
//! | QR            | [`qr`]  | `A = QR`      |

pub mod qr;

pub use qr::{QrDecomposition, lstsq};
