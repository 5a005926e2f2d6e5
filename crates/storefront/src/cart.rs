//! Session-backed cart store.
//!
//! The cart state machine itself lives in `cordwain_core::cart`; this module
//! owns durability. Each HTTP session holds at most one cart, stored as a
//! JSON array of lines under a single key. Every mutation writes the full
//! line sequence back, so a response implies the cart is durable.
//!
//! Load failures are deliberately forgiving: a cart that fails to
//! deserialize (stale schema, hand-edited storage) is logged and treated as
//! empty rather than surfaced to the shopper.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use tower_sessions::Session;

use cordwain_core::{CartLine, CartState};

/// Session key holding the serialized cart line sequence.
pub const CART_KEY: &str = "cart";

/// Explicit store object for the session cart.
///
/// Obtained as an axum extractor; handlers receive it instead of reaching
/// for ambient storage.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(cart_store: SessionCart) -> impl IntoResponse {
///     let mut cart = cart_store.load().await;
///     cart.add_line(line);
///     cart_store.save(&cart).await?;
/// }
/// ```
pub struct SessionCart {
    session: Session,
}

impl SessionCart {
    /// Wrap a session in a cart store.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load the cart for this session.
    ///
    /// A missing key yields an empty cart. A key that fails to deserialize
    /// is logged at warn and also yields an empty cart; the shopper never
    /// sees the failure.
    pub async fn load(&self) -> CartState {
        match self.session.get::<Vec<CartLine>>(CART_KEY).await {
            Ok(Some(lines)) => CartState::restore(lines),
            Ok(None) => CartState::new(),
            Err(e) => {
                tracing::warn!("Failed to deserialize stored cart, starting empty: {e}");
                CartState::new()
            }
        }
    }

    /// Persist the full line sequence for this session.
    ///
    /// # Errors
    ///
    /// Returns the session store error if the write fails.
    pub async fn save(&self, cart: &CartState) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(CART_KEY, cart.lines()).await
    }
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(Self::new(session))
    }
}
