// File: cafe-site/src/messages.rs
// Purpose: Texts the page feeds into the notifier

use cafe_notify::NotificationKind;

/// Button label that marks a product action as an order rather than add-to-cart
const ORDER_NOW_LABEL: &str = "ORDER NOW";

/// Every notification the page can raise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteMessage {
    BookingConfirmed,
    BookingRejected,
    ProductOrdered { product: String },
    AddedToCart { product: String },
    BlogPreview { title: String },
}

impl SiteMessage {
    /// Pick the product message from the clicked button's label
    pub fn product_action(product: impl Into<String>, button_label: &str) -> Self {
        let product = product.into().trim().to_string();
        if button_label.contains(ORDER_NOW_LABEL) {
            SiteMessage::ProductOrdered { product }
        } else {
            SiteMessage::AddedToCart { product }
        }
    }

    pub fn blog_preview(title: impl Into<String>) -> Self {
        SiteMessage::BlogPreview {
            title: title.into().trim().to_string(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            SiteMessage::BookingConfirmed => "Thank you! Your table reservation has been submitted successfully. We will contact you shortly to confirm your booking.".to_string(),
            SiteMessage::BookingRejected => "Please correct the errors above".to_string(),
            SiteMessage::ProductOrdered { product } => format!(
                "Great choice! {} order process initiated. Redirecting to checkout...",
                product
            ),
            SiteMessage::AddedToCart { product } => {
                format!("{} has been added to your cart!", product)
            }
            SiteMessage::BlogPreview { title } => format!(
                "Opening blog post: \"{}\". This would normally navigate to the full article.",
                title
            ),
        }
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            SiteMessage::BookingRejected => NotificationKind::Error,
            _ => NotificationKind::Success,
        }
    }
}
