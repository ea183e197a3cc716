pub mod postgres;

pub use postgres::create_pool;
pub use postgres::PgWishlistStore;
pub use postgres::WishlistStore;

#[cfg(test)]
pub use postgres::MockWishlistStore;
