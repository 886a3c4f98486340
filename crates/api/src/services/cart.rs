//! Session-backed cart storage.
//!
//! The cart lives in the caller's session under [`session_keys::CART`]. Every
//! mutation loads the cart, applies a [`Cart`] operation and writes it back.

use tower_sessions::Session;

use pharmahub_core::Cart;

use crate::error::AppError;
use crate::models::session_keys;

/// Handle to the cart of one session.
pub struct CartSession<'a> {
    session: &'a Session,
}

impl<'a> CartSession<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Load the cart, or an empty one if the session has none yet.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the session store fails.
    pub async fn load(&self) -> Result<Cart, AppError> {
        let cart = self
            .session
            .get::<Cart>(session_keys::CART)
            .await
            .map_err(|e| AppError::Internal(format!("failed to read cart from session: {e}")))?;
        Ok(cart.unwrap_or_default())
    }

    /// Persist `cart` to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the session store fails.
    pub async fn save(&self, cart: &Cart) -> Result<(), AppError> {
        self.session
            .insert(session_keys::CART, cart)
            .await
            .map_err(|e| AppError::Internal(format!("failed to write cart to session: {e}")))
    }

    /// Load, mutate and save in one step. Returns the updated cart and the
    /// closure's result.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the session store fails.
    pub async fn modify<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> Result<(Cart, R), AppError> {
        let mut cart = self.load().await?;
        let result = f(&mut cart);
        self.save(&cart).await?;
        Ok((cart, result))
    }
}
