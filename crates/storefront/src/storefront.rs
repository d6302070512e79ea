//! The storefront widget: wires catalog, cart, render and notifications
//! together behind a single event entry point.
//!
//! ```rust,ignore
//! let mut storefront = Storefront::new(storage, catalog, surface, &config);
//! storefront.start().await;
//! storefront.dispatch(UiEvent::AddCatalogProduct { id: ProductId::from(1) });
//!
//! // Keep the toast slot in step with the toast's lifecycle
//! storefront.run_toasts().await;
//! ```
//!
//! Event loops that keep taking input while a toast is up select on
//! [`Storefront::next_toast_change`] instead of awaiting `run_toasts`.

use tokio::sync::watch;
use tracing::instrument;
use vitrina_core::Product;

use crate::cart::{CartEngine, CartOutcome};
use crate::catalog::CatalogSource;
use crate::config::StorefrontConfig;
use crate::events::{EventRouter, RouteError, Routed, UiEvent};
use crate::forms::{Form, FormOutcome};
use crate::notify::{Notice, Notifier, Toast};
use crate::render::{self, RenderError, Slot, Surface};
use crate::storage::{CartStorage, KeyValueStore};

/// Message shown when the catalog could not be fetched.
pub const CATALOG_ERROR_MESSAGE: &str = "Could not load products. Please try again.";

/// What [`Storefront::dispatch`] did with an event.
#[derive(Debug)]
pub enum Dispatched {
    /// The event reached the cart.
    Cart(CartOutcome),
    /// A form was submitted. `form` is its state afterwards: reset when
    /// accepted, marked when rejected. `inline_errors` pairs each marked field
    /// with the HTML shown after it.
    Form {
        form: Form,
        outcome: FormOutcome,
        inline_errors: Vec<(String, String)>,
    },
    /// The event could not be routed; the visitor was notified.
    Rejected(RouteError),
}

/// The storefront widget.
#[derive(Debug)]
pub struct Storefront<S, C, U> {
    engine: CartEngine<S>,
    source: C,
    catalog: Vec<Product>,
    catalog_limit: u32,
    notifier: Notifier,
    toasts: watch::Receiver<Option<Toast>>,
    surface: U,
    router: EventRouter,
}

impl<S, C, U> Storefront<S, C, U>
where
    S: KeyValueStore,
    C: CatalogSource,
    U: Surface,
{
    /// Hydrate the cart from `storage` and render the cart panel and badge.
    pub fn new(storage: CartStorage<S>, source: C, surface: U, config: &StorefrontConfig) -> Self {
        let notifier = Notifier::new(config.notifications);
        let mut storefront = Self {
            engine: CartEngine::hydrate(storage),
            source,
            catalog: Vec::new(),
            catalog_limit: config.catalog_limit,
            toasts: notifier.subscribe(),
            notifier,
            surface,
            router: EventRouter,
        };
        storefront.render_cart();
        storefront
    }

    /// Fetch the catalog once and render the product grid.
    ///
    /// On failure the visitor is notified and the grid stays empty; the cart
    /// keeps working.
    #[instrument(skip(self), fields(limit = self.catalog_limit))]
    pub async fn start(&mut self) {
        match self.source.fetch_catalog(self.catalog_limit).await {
            Ok(products) => {
                tracing::info!(count = products.len(), "Catalog loaded");
                self.catalog = products;
                match render::render_catalog(&self.catalog) {
                    Ok(html) => self.mount(Slot::ProductGrid, html),
                    Err(e) => tracing::error!(error = %e, "Failed to render catalog"),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                self.notify(Notice::error(CATALOG_ERROR_MESSAGE));
            }
        }
    }

    /// Handle one visitor action. Never fails: problems become notifications.
    pub fn dispatch(&mut self, event: UiEvent) -> Dispatched {
        match self.router.route(event, &self.catalog) {
            Ok(Routed::Cart(intent)) => {
                let outcome = intent.apply(&mut self.engine);
                if outcome.needs_render() {
                    self.render_cart();
                }
                if let Some(notice) = outcome.notice.clone() {
                    self.notify(notice);
                }
                Dispatched::Cart(outcome)
            }
            Ok(Routed::Form(mut form)) => {
                let outcome = form.submit();
                let inline_errors = form.render_errors().unwrap_or_else(|e| {
                    tracing::error!(error = %e, "Failed to render form errors");
                    Vec::new()
                });
                self.notify(outcome.notice());
                Dispatched::Form {
                    form,
                    outcome,
                    inline_errors,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Event rejected");
                self.notify(Notice::error(e.to_string()));
                Dispatched::Rejected(e)
            }
        }
    }

    /// Wait for the current toast to change phase, then re-render the toast
    /// slot. Pending forever while no toast is up.
    pub async fn next_toast_change(&mut self) {
        if self.toasts.changed().await.is_ok() {
            self.render_toast();
        } else {
            // The notifier owns a sender for as long as `self` lives
            std::future::pending::<()>().await;
        }
    }

    /// Drive the toast slot until the current toast has been removed.
    /// Returns at once if no toast is up.
    pub async fn run_toasts(&mut self) {
        if self.toasts.has_changed().unwrap_or(false) {
            self.render_toast();
        }
        while self.toasts.borrow().is_some() {
            self.next_toast_change().await;
        }
    }

    /// The loaded catalog (empty until [`Self::start`] succeeds).
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    #[must_use]
    pub const fn engine(&self) -> &CartEngine<S> {
        &self.engine
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub const fn surface(&self) -> &U {
        &self.surface
    }

    fn notify(&mut self, notice: Notice) {
        self.notifier.notify(notice);
        self.render_toast();
    }

    fn render_toast(&mut self) {
        let toast = self.toasts.borrow_and_update().clone();
        match render::render_toast(toast.as_ref()) {
            Ok(html) => self.mount(Slot::Toast, html),
            Err(e) => tracing::error!(error = %e, "Failed to render toast"),
        }
    }

    fn render_cart(&mut self) {
        if let Err(e) = self.try_render_cart() {
            tracing::error!(error = %e, "Failed to render cart");
        }
    }

    fn try_render_cart(&mut self) -> Result<(), RenderError> {
        let cart = self.engine.cart();
        let items = render::render_cart_items(cart)?;
        let total = render::render_cart_total(cart);
        let badge = render::render_badge(cart.item_count())?;

        self.mount(Slot::CartItems, items);
        self.mount(Slot::CartTotal, total);
        self.mount(Slot::CartBadge, badge);
        Ok(())
    }

    fn mount(&mut self, slot: Slot, html: String) {
        if !self.surface.mount(slot, html) {
            tracing::warn!(?slot, "Slot missing from surface, content dropped");
        }
    }
}
