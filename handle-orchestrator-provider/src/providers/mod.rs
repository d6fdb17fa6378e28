//! Registrar implementations

mod namecheap;

pub use namecheap::{
    NAMECHEAP_API_URL, NAMECHEAP_SANDBOX_API_URL, NamecheapProvider, NamecheapProviderBuilder,
};
