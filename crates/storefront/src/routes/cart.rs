//! Cart and checkout route handlers.
//!
//! Both handlers fire a checkout lifecycle event against the live cart total.
//! Cart IDs are stored in the session and mapped to Shopify carts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use order_value_bouncer_core::{CheckoutEvent, Destination, HookFlow, Notice};

use crate::error::Result;
use crate::models::session_keys;
use crate::services::CheckoutGuard;
use crate::services::notices::{add_notice, take_notices};
use crate::shopify::{CartLine, CartSummary};
use crate::state::AppState;

/// Path of the cart page.
pub const CART_PATH: &str = "/cart";

/// Notice shown when the cart cannot be checked before checkout.
const CART_UNAVAILABLE_MESSAGE: &str =
    "We couldn't check your cart right now. Please try again in a moment.";

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: String::new(),
            item_count: 0,
        }
    }

    /// Whether there is anything to check out.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

impl From<&CartSummary> for CartView {
    fn from(cart: &CartSummary) -> Self {
        Self {
            lines: cart.lines.iter().map(CartLineView::from).collect(),
            total: cart.total.display(),
            item_count: cart.total_quantity,
        }
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            title: line.title.clone(),
            variant_title: line.variant_title.clone(),
            quantity: line.quantity,
            line_price: line.total.display(),
        }
    }
}

/// Path a halted event sends the customer to.
#[must_use]
pub const fn destination_path(destination: Destination) -> &'static str {
    match destination {
        Destination::CartPage => CART_PATH,
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub notices: Vec<Notice>,
    pub checkout_blocked: bool,
}

// =============================================================================
// Guard Outcomes
// =============================================================================

/// What `GET /cart` does once the guard has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPageStep {
    /// Render the cart page, queueing `notice` first.
    Render {
        /// Notice raised by the guard, if any.
        notice: Option<Notice>,
        /// Whether the checkout button is disabled.
        checkout_blocked: bool,
    },
    /// Leave for another page with a notice.
    Redirect {
        /// Storefront path to send the customer to.
        to: &'static str,
        /// Notice shown on arrival.
        notice: Notice,
    },
}

impl CartPageStep {
    /// Nothing to report: render the cart with checkout enabled.
    #[must_use]
    pub const fn open() -> Self {
        Self::Render {
            notice: None,
            checkout_blocked: false,
        }
    }

    /// Map a `CheckCartItems` result onto the cart page.
    ///
    /// A halt that points back at the cart is shown in place, since
    /// redirecting would land on this page again.
    #[must_use]
    pub fn after_guard(flow: HookFlow) -> Self {
        match flow {
            HookFlow::Continue => Self::open(),
            HookFlow::Halt(interruption) => {
                let to = destination_path(interruption.redirect);
                if to == CART_PATH {
                    Self::Render {
                        notice: Some(interruption.notice),
                        checkout_blocked: true,
                    }
                } else {
                    Self::Redirect {
                        to,
                        notice: interruption.notice,
                    }
                }
            }
        }
    }

    /// Queue the notice and build the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written.
    pub async fn respond(
        self,
        session: &Session,
        cart: Option<&CartSummary>,
    ) -> Result<Response> {
        let checkout_blocked = match self {
            Self::Redirect { to, notice } => {
                add_notice(session, notice).await?;
                return Ok(Redirect::to(to).into_response());
            }
            Self::Render {
                notice,
                checkout_blocked,
            } => {
                if let Some(notice) = notice {
                    add_notice(session, notice).await?;
                }
                checkout_blocked
            }
        };

        let notices = take_notices(session).await?;

        Ok(CartShowTemplate {
            cart: cart.map_or_else(CartView::empty, CartView::from),
            notices,
            checkout_blocked,
        }
        .into_response())
    }
}

/// Where `GET /checkout` sends the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutStep {
    /// Redirect target.
    pub location: String,
    /// Notice queued before redirecting.
    pub notice: Option<Notice>,
}

impl CheckoutStep {
    /// Nothing to check out.
    #[must_use]
    pub fn back_to_cart() -> Self {
        Self {
            location: CART_PATH.to_owned(),
            notice: None,
        }
    }

    /// The cart could not be read, so checkout is refused.
    #[must_use]
    pub fn cart_unavailable() -> Self {
        Self {
            location: CART_PATH.to_owned(),
            notice: Some(Notice::error(CART_UNAVAILABLE_MESSAGE)),
        }
    }

    /// Map a `BeforeCheckoutProcess` result onto a redirect.
    #[must_use]
    pub fn after_guard(flow: HookFlow, cart: &CartSummary) -> Self {
        match flow {
            HookFlow::Continue => Self {
                location: cart.checkout_url.clone(),
                notice: None,
            },
            HookFlow::Halt(interruption) => Self {
                location: destination_path(interruption.redirect).to_owned(),
                notice: Some(interruption.notice),
            },
        }
    }

    /// Queue the notice and build the redirect.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written.
    pub async fn respond(self, session: &Session) -> Result<Redirect> {
        if let Some(notice) = self.notice {
            add_notice(session, notice).await?;
        }
        Ok(Redirect::to(&self.location))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
///
/// Fires `CheckCartItems` for a non-empty cart. A block on this page is shown
/// in place, with checkout disabled.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => match state.carts().get_cart(&cart_id).await {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!("Failed to fetch cart {cart_id}: {e}");
                None
            }
        },
        None => None,
    };

    let step = match cart.as_ref().filter(|cart| !cart.is_empty()) {
        Some(cart) => {
            let flow = CheckoutGuard::new(state.pool(), state.hooks())
                .run(CheckoutEvent::CheckCartItems, cart.total.amount)
                .await?;
            CartPageStep::after_guard(flow)
        }
        None => CartPageStep::open(),
    };

    step.respond(&session, cart.as_ref()).await
}

/// Redirect to Shopify checkout.
///
/// Fires `BeforeCheckoutProcess` first. If the cart cannot be read, checkout
/// is refused and the customer is sent back to the cart.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CheckoutStep::back_to_cart().respond(&session).await;
    };

    let step = match state.carts().get_cart(&cart_id).await {
        Err(e) => {
            tracing::error!(cart_id = %cart_id, error = %e, "Failed to fetch cart for checkout");
            CheckoutStep::cart_unavailable()
        }
        Ok(cart) if cart.is_empty() => CheckoutStep::back_to_cart(),
        Ok(cart) => {
            let flow = CheckoutGuard::new(state.pool(), state.hooks())
                .run(CheckoutEvent::BeforeCheckoutProcess, cart.total.amount)
                .await?;
            CheckoutStep::after_guard(flow, &cart)
        }
    };

    step.respond(&session).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::http::{StatusCode, header};
    use order_value_bouncer_core::{BouncerSettings, CartMessage, LifecycleHooks, MinimumAmount};
    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::services::checkout_guard::evaluate;
    use crate::shopify::Money;

    const MESSAGE: &str = "Spend at least $50 to check out.";

    fn money(cents: i64) -> Money {
        Money {
            amount: Decimal::new(cents, 2),
            currency_code: "USD".to_string(),
        }
    }

    fn cart() -> CartSummary {
        CartSummary {
            id: "gid://shopify/Cart/1".to_string(),
            checkout_url: "https://shop.example/checkouts/1".to_string(),
            total_quantity: 2,
            total: money(4999),
            lines: vec![CartLine {
                id: "gid://shopify/CartLine/1".to_string(),
                title: "Socks".to_string(),
                variant_title: Some("Blue".to_string()),
                quantity: 2,
                total: money(4999),
            }],
        }
    }

    #[test]
    fn test_destination_path() {
        assert_eq!(destination_path(Destination::CartPage), "/cart");
    }

    #[test]
    fn test_cart_view_from_summary() {
        let view = CartView::from(&cart());
        assert_eq!(view.total, "49.99 USD");
        assert_eq!(view.item_count, 2);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].line_price, "49.99 USD");
        assert!(!view.is_empty());
        assert!(CartView::empty().is_empty());
    }

    #[test]
    fn test_blocked_cart_renders_notice_and_disables_checkout() {
        let html = CartShowTemplate {
            cart: CartView::from(&cart()),
            notices: vec![Notice::error("Spend at least 50 <USD>")],
            checkout_blocked: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("Spend at least 50"));
        assert!(!html.contains("<USD>"));
        assert!(html.contains("notice--error"));
        assert!(html.contains("disabled"));
        assert!(!html.contains("href=\"/checkout\""));
    }

    #[test]
    fn test_open_cart_links_to_checkout() {
        let html = CartShowTemplate {
            cart: CartView::from(&cart()),
            notices: vec![],
            checkout_blocked: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("href=\"/checkout\""));
        assert!(html.contains("Socks"));
    }

    // =========================================================================
    // Guard outcomes at the handlers
    // =========================================================================

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn cart_totalling(cents: i64) -> CartSummary {
        CartSummary {
            total: money(cents),
            ..cart()
        }
    }

    fn guard(event: CheckoutEvent, cart: &CartSummary) -> HookFlow {
        let settings = BouncerSettings {
            minimum_amount: MinimumAmount::new(50),
            message: CartMessage::parse(MESSAGE).unwrap(),
        };
        evaluate(&LifecycleHooks::minimum_order(), event, settings, cart.total.amount)
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    async fn body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_checkout_below_minimum_returns_to_cart_with_notice() {
        let session = session();
        let cart = cart_totalling(4999);

        let flow = guard(CheckoutEvent::BeforeCheckoutProcess, &cart);
        let step = CheckoutStep::after_guard(flow, &cart);
        assert_eq!(step.location, CART_PATH);

        let response = step.respond(&session).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/cart");
        assert_ne!(location(&response), cart.checkout_url);

        let notices = take_notices(&session).await.unwrap();
        assert_eq!(notices, vec![Notice::error(MESSAGE)]);
    }

    #[tokio::test]
    async fn test_checkout_at_minimum_goes_to_shopify() {
        let session = session();
        let cart = cart_totalling(5000);

        let flow = guard(CheckoutEvent::BeforeCheckoutProcess, &cart);
        let step = CheckoutStep::after_guard(flow, &cart);
        let response = step.respond(&session).await.unwrap().into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "https://shop.example/checkouts/1");
        assert!(take_notices(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_refused_when_cart_unavailable() {
        let session = session();

        let response = CheckoutStep::cart_unavailable()
            .respond(&session)
            .await
            .unwrap()
            .into_response();

        assert_eq!(location(&response), "/cart");
        let notices = take_notices(&session).await.unwrap();
        assert_eq!(notices, vec![Notice::error(CART_UNAVAILABLE_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_checkout_without_items_returns_to_cart_quietly() {
        let session = session();

        let response = CheckoutStep::back_to_cart()
            .respond(&session)
            .await
            .unwrap()
            .into_response();

        assert_eq!(location(&response), "/cart");
        assert!(take_notices(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_page_below_minimum_blocks_in_place() {
        let session = session();
        let cart = cart_totalling(4999);

        let step = CartPageStep::after_guard(guard(CheckoutEvent::CheckCartItems, &cart));
        assert_eq!(
            step,
            CartPageStep::Render {
                notice: Some(Notice::error(MESSAGE)),
                checkout_blocked: true,
            }
        );

        let response = step.respond(&session, Some(&cart)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body(response).await;
        assert!(html.contains(MESSAGE));
        assert!(html.contains("notice--error"));
        assert!(html.contains("disabled"));
        assert!(!html.contains("href=\"/checkout\""));

        // Shown once, then gone
        assert!(take_notices(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_page_at_minimum_allows_checkout() {
        let session = session();
        let cart = cart_totalling(5000);

        let step = CartPageStep::after_guard(guard(CheckoutEvent::CheckCartItems, &cart));
        assert_eq!(step, CartPageStep::open());

        let html = body(step.respond(&session, Some(&cart)).await.unwrap()).await;
        assert!(html.contains("href=\"/checkout\""));
        assert!(!html.contains(MESSAGE));
    }

    #[tokio::test]
    async fn test_blocked_checkout_then_cart_page_shows_notice_once() {
        let session = session();
        let cart = cart_totalling(4999);

        let flow = guard(CheckoutEvent::BeforeCheckoutProcess, &cart);
        CheckoutStep::after_guard(flow, &cart)
            .respond(&session)
            .await
            .unwrap();

        let html = body(
            CartPageStep::after_guard(guard(CheckoutEvent::CheckCartItems, &cart))
                .respond(&session, Some(&cart))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(html.matches(MESSAGE).count(), 1);
    }

    #[tokio::test]
    async fn test_cart_page_shows_queued_unavailable_notice() {
        let session = session();
        CheckoutStep::cart_unavailable().respond(&session).await.unwrap();

        let html = body(CartPageStep::open().respond(&session, None).await.unwrap()).await;
        assert!(html.contains("Please try again in a moment."));
        assert!(html.contains("Your cart is currently empty."));
    }
}
