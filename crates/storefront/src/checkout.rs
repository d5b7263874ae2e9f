//! Cash-on-delivery checkout flow.
//!
//! An [`OrderForm`] collects customer details with live phone validation,
//! and a [`CheckoutFlow`] drives the submission lifecycle: it starts in
//! `Editing`, passes through `Submitting` exactly once per attempt, and
//! ends in `Success` only after the order write is confirmed. `Success` is
//! terminal; a second submit is rejected structurally rather than by a
//! disabled button.

use boutik_core::{
    DeliveryMethod, Language, OrderId, OrderStatus, PhoneError, PhoneNumber, Price, WilayaId,
};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::cart::CartStore;
use crate::delivery::{self, Wilaya};
use crate::gateway::{NewOrder, NewOrderItem, StoreGateway};
use crate::store::StoreError;

/// Name of the municipality column on the orders table. Older deployments
/// predate it; PostgREST names it in the rejection message.
const BALADIYA_COLUMN: &str = "custom_baladiya";

/// A form field the customer has not filled in correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("first name is required")]
    MissingFirstName,
    #[error("last name is required")]
    MissingLastName,
    #[error("invalid phone number: {0}")]
    Phone(#[from] PhoneError),
    #[error("wilaya is required")]
    MissingWilaya,
    #[error("municipality is required")]
    MissingBaladiya,
    #[error("address is required for home delivery")]
    MissingAddress,
}

impl FormError {
    /// Customer-facing message in the active language.
    #[must_use]
    pub const fn message(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::EmptyCart, Language::En) => "Your cart is empty",
            (Self::EmptyCart, Language::Ar) => "سلتك فارغة",
            (Self::MissingFirstName, Language::En) => "Please enter your first name",
            (Self::MissingFirstName, Language::Ar) => "الرجاء إدخال الاسم",
            (Self::MissingLastName, Language::En) => "Please enter your last name",
            (Self::MissingLastName, Language::Ar) => "الرجاء إدخال اللقب",
            (Self::Phone(_), Language::En) => {
                "Please enter a valid 10-digit phone number starting with 05, 06 or 07"
            }
            (Self::Phone(_), Language::Ar) => {
                "الرجاء إدخال رقم هاتف صحيح من 10 أرقام يبدأ بـ 05 أو 06 أو 07"
            }
            (Self::MissingWilaya, Language::En) => "Please select your wilaya",
            (Self::MissingWilaya, Language::Ar) => "الرجاء اختيار الولاية",
            (Self::MissingBaladiya, Language::En) => "Please enter your municipality",
            (Self::MissingBaladiya, Language::Ar) => "الرجاء إدخال البلدية",
            (Self::MissingAddress, Language::En) => "Please enter your delivery address",
            (Self::MissingAddress, Language::Ar) => "الرجاء إدخال عنوان التوصيل",
        }
    }
}

/// Checkout form state. Setters normalize input; [`OrderForm::validate`]
/// gates submission.
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    first_name: String,
    last_name: String,
    /// Cleaned digits only, at most ten.
    phone: String,
    wilaya_id: Option<WilayaId>,
    /// Free-text municipality.
    baladiya: String,
    address: String,
    instagram_handle: String,
    delivery_method: DeliveryMethod,
}

impl OrderForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_first_name(&mut self, value: &str) {
        self.first_name = value.trim().to_string();
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.last_name = value.trim().to_string();
    }

    /// Store the phone input cleaned: non-digits stripped, truncated to
    /// ten digits. The raw keystrokes are never kept.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = PhoneNumber::clean(raw);
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Live phone validation; `None` while the field is empty so an
    /// untouched form shows no error.
    #[must_use]
    pub fn phone_error(&self) -> Option<PhoneError> {
        if self.phone.is_empty() {
            return None;
        }
        PhoneNumber::parse(&self.phone).err()
    }

    pub fn select_wilaya(&mut self, id: WilayaId) {
        self.wilaya_id = Some(id);
    }

    #[must_use]
    pub const fn wilaya_id(&self) -> Option<WilayaId> {
        self.wilaya_id
    }

    pub fn set_baladiya(&mut self, value: &str) {
        self.baladiya = value.trim().to_string();
    }

    pub fn set_address(&mut self, value: &str) {
        self.address = value.trim().to_string();
    }

    pub fn set_instagram_handle(&mut self, value: &str) {
        self.instagram_handle = value.trim().to_string();
    }

    pub fn set_delivery_method(&mut self, method: DeliveryMethod) {
        self.delivery_method = method;
    }

    #[must_use]
    pub const fn delivery_method(&self) -> DeliveryMethod {
        self.delivery_method
    }

    /// Delivery price for the current wilaya/method selection; zero until
    /// a wilaya is picked.
    #[must_use]
    pub fn delivery_price(&self, wilayas: &[Wilaya]) -> Price {
        delivery::delivery_price(wilayas, self.wilaya_id, self.delivery_method)
    }

    /// Cart total plus delivery.
    #[must_use]
    pub fn final_total(&self, cart_total: Price, wilayas: &[Wilaya]) -> Price {
        cart_total + self.delivery_price(wilayas)
    }

    /// Check the form top to bottom, reporting the first problem: names,
    /// then phone, then wilaya and municipality, then the address when the
    /// method requires one.
    pub fn validate(&self) -> Result<ValidOrder, FormError> {
        if self.first_name.is_empty() {
            return Err(FormError::MissingFirstName);
        }
        if self.last_name.is_empty() {
            return Err(FormError::MissingLastName);
        }
        let phone = PhoneNumber::parse(&self.phone)?;
        let wilaya_id = self.wilaya_id.ok_or(FormError::MissingWilaya)?;
        if self.baladiya.is_empty() {
            return Err(FormError::MissingBaladiya);
        }
        if self.delivery_method.requires_address() && self.address.is_empty() {
            return Err(FormError::MissingAddress);
        }

        Ok(ValidOrder {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone,
            wilaya_id,
            baladiya: self.baladiya.clone(),
            address: (!self.address.is_empty()).then(|| self.address.clone()),
            instagram_handle: (!self.instagram_handle.is_empty())
                .then(|| self.instagram_handle.clone()),
            delivery_method: self.delivery_method,
        })
    }
}

/// A form that passed validation, ready to be priced and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidOrder {
    pub first_name: String,
    pub last_name: String,
    pub phone: PhoneNumber,
    pub wilaya_id: WilayaId,
    pub baladiya: String,
    pub address: Option<String>,
    pub instagram_handle: Option<String>,
    pub delivery_method: DeliveryMethod,
}

/// Where a checkout session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Editing,
    Submitting,
    /// Terminal: the order was written and the cart cleared.
    Success(OrderId),
}

/// Why a submit attempt did not produce an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Submit called while a submission is in flight or already done.
    #[error("checkout is not editable")]
    NotEditing,

    #[error(transparent)]
    Form(#[from] FormError),

    /// The order write failed; the cart and form are untouched.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Banner shown above the form after a failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBanner {
    /// The remote rejected the municipality column: the deployment is
    /// running an outdated orders schema.
    SchemaOutOfDate,
    /// Any other write failure; carries the backend message verbatim.
    Failed(String),
}

impl SubmitBanner {
    #[must_use]
    pub fn message(&self, language: Language) -> &str {
        match (self, language) {
            (Self::SchemaOutOfDate, Language::En) => {
                "The store database is missing the municipality column. \
                 Ask the administrator to apply the latest database update."
            }
            (Self::SchemaOutOfDate, Language::Ar) => {
                "قاعدة بيانات المتجر تفتقد عمود البلدية. يرجى إبلاغ المسؤول لتحديثها."
            }
            (Self::Failed(message), _) => message,
        }
    }
}

/// One checkout session over a cart.
///
/// Owns the wilaya table and the form; the cart stays outside so the rest
/// of the session keeps using it if the customer navigates away.
#[derive(Debug)]
pub struct CheckoutFlow {
    form: OrderForm,
    wilayas: Vec<Wilaya>,
    phase: CheckoutPhase,
    banner: Option<SubmitBanner>,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(wilayas: Vec<Wilaya>) -> Self {
        Self {
            form: OrderForm::new(),
            wilayas,
            phase: CheckoutPhase::Editing,
            banner: None,
        }
    }

    /// Load the wilaya table through the gateway and start a session.
    pub async fn start<G: StoreGateway>(gateway: &G) -> Self {
        Self::new(delivery::load_wilayas(gateway).await)
    }

    #[must_use]
    pub const fn form(&self) -> &OrderForm {
        &self.form
    }

    /// Mutable form access; refused after submission starts.
    pub fn form_mut(&mut self) -> Option<&mut OrderForm> {
        match self.phase {
            CheckoutPhase::Editing => Some(&mut self.form),
            CheckoutPhase::Submitting | CheckoutPhase::Success(_) => None,
        }
    }

    #[must_use]
    pub fn wilayas(&self) -> &[Wilaya] {
        &self.wilayas
    }

    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    #[must_use]
    pub const fn banner(&self) -> Option<&SubmitBanner> {
        self.banner.as_ref()
    }

    /// Current delivery price for the summary panel.
    #[must_use]
    pub fn delivery_price(&self) -> Price {
        self.form.delivery_price(&self.wilayas)
    }

    /// Cart total plus delivery for the summary panel.
    #[must_use]
    pub fn final_total(&self, cart: &CartStore) -> Price {
        self.form.final_total(cart.total(), &self.wilayas)
    }

    /// Validate and submit the order.
    ///
    /// On success the cart is cleared and the phase moves to `Success`,
    /// which is terminal. On a write failure the phase returns to
    /// `Editing`, the cart is untouched, and a banner explains what
    /// happened. Re-entrant calls while submitting (or after success) are
    /// rejected without touching anything.
    #[instrument(skip_all, fields(lines = cart.len()))]
    pub async fn submit<G: StoreGateway>(
        &mut self,
        gateway: &G,
        cart: &mut CartStore,
    ) -> Result<OrderId, CheckoutError> {
        if self.phase != CheckoutPhase::Editing {
            return Err(CheckoutError::NotEditing);
        }
        if cart.is_empty() {
            return Err(CheckoutError::Form(FormError::EmptyCart));
        }

        let valid = self.form.validate()?;

        let shipping_fee =
            delivery::delivery_price(&self.wilayas, Some(valid.wilaya_id), valid.delivery_method);
        let total_amount = cart.total() + shipping_fee;

        let order = NewOrder {
            first_name: valid.first_name,
            last_name: valid.last_name,
            phone: valid.phone,
            wilaya_id: valid.wilaya_id,
            custom_baladiya: valid.baladiya,
            address: valid.address,
            instagram_handle: valid.instagram_handle,
            delivery_method: valid.delivery_method,
            shipping_fee,
            total_amount,
            status: OrderStatus::Pending,
        };
        let items = cart
            .lines()
            .iter()
            .map(|line| NewOrderItem {
                product_id: line.product_id,
                variant_id: line.variant_id,
                quantity: line.quantity,
                price_at_purchase: line.unit_price,
            })
            .collect();

        self.phase = CheckoutPhase::Submitting;
        self.banner = None;

        match gateway.place_order(order, items).await {
            Ok(order_id) => {
                cart.clear();
                self.phase = CheckoutPhase::Success(order_id);
                info!(%order_id, %total_amount, "order placed");
                Ok(order_id)
            }
            Err(store_error) => {
                self.phase = CheckoutPhase::Editing;
                self.banner = Some(if store_error.mentions_column(BALADIYA_COLUMN) {
                    SubmitBanner::SchemaOutOfDate
                } else {
                    SubmitBanner::Failed(store_error.to_string())
                });
                error!(error = %store_error, "order submission failed");
                Err(CheckoutError::Store(store_error))
            }
        }
    }
}
