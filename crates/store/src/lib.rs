//! Choco Shelf Store - namespaced record storage for the storefront demo.
//!
//! The store simulates table-like collections (products, cart, orders,
//! customers) and singleton records (settings, stats) on top of a flat
//! string key-value backend with JSON serialization. Every operation is a
//! direct, synchronous read-modify-write; there is no concurrency control,
//! no retry policy, and no cross-key atomicity.
//!
//! # Modules
//!
//! - [`backend`] - flat key-value backends (in-memory, single-file)
//! - [`store`] - the namespaced [`RecordStore`] façade and snapshots
//! - [`models`] - the persisted record types
//! - [`products`], [`cart`], [`orders`], [`customers`], [`settings`],
//!   [`stats`] - typed repositories over the store
//! - [`checkout`] - the cart → order → customer sequence
//!
//! # Example
//!
//! ```
//! use choco_shelf_store::cart::CartRepository;
//! use choco_shelf_store::models::CartItem;
//! use choco_shelf_store::products::ProductRepository;
//! use choco_shelf_store::store::RecordStore;
//!
//! # fn main() -> Result<(), choco_shelf_store::error::StoreError> {
//! let mut store = RecordStore::in_memory("choco_shop");
//! store.initialize()?;
//!
//! let product = ProductRepository::new(&mut store)
//!     .list()?
//!     .into_iter()
//!     .next()
//!     .expect("seed catalog is not empty");
//! CartRepository::new(&mut store).add(CartItem::of(&product, 1))?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod cart;
pub mod checkout;
pub mod customers;
pub mod error;
pub mod models;
pub mod orders;
pub mod products;
pub mod settings;
pub mod stats;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{StorageError, StoreError};
pub use store::{RecordStore, Snapshot};
