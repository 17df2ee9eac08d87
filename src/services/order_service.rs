use tracing::info;

use crate::errors::{ApiError, OrderError};
use crate::external::DataSource;
use crate::models::{NewOrder, Order, OrderPatch};
use crate::session::{Credential, SessionGuard};

/// Order book maintenance. Writes are validated client-side before any
/// request leaves the process, and every unauthorized response tears the
/// session down like the read paths do.
pub async fn list_orders(
    source: &dyn DataSource,
    session: &SessionGuard,
) -> Result<Vec<Order>, OrderError> {
    let credential = credential_for(session)?;
    finish(session, source.orders(&credential).await)
}

pub async fn place_order(
    source: &dyn DataSource,
    session: &SessionGuard,
    order: &NewOrder,
) -> Result<Order, OrderError> {
    validate_new(order)?;
    let credential = credential_for(session)?;
    let placed = finish(session, source.add_order(&credential, order).await)?;
    info!(symbol = %placed.symbol, "order recorded");
    Ok(placed)
}

pub async fn amend_order(
    source: &dyn DataSource,
    session: &SessionGuard,
    order_id: &str,
    patch: &OrderPatch,
) -> Result<Order, OrderError> {
    validate_patch(patch)?;
    let credential = credential_for(session)?;
    finish(session, source.update_order(&credential, order_id, patch).await)
}

pub async fn remove_order(
    source: &dyn DataSource,
    session: &SessionGuard,
    order_id: &str,
) -> Result<(), OrderError> {
    let credential = credential_for(session)?;
    finish(session, source.delete_order(&credential, order_id).await)
}

pub async fn clear_orders(
    source: &dyn DataSource,
    session: &SessionGuard,
) -> Result<(), OrderError> {
    let credential = credential_for(session)?;
    finish(session, source.delete_all_orders(&credential).await)
}

fn credential_for(session: &SessionGuard) -> Result<Credential, OrderError> {
    session
        .current()
        .ok_or(OrderError::Api(ApiError::Unauthorized))
}

fn finish<T>(session: &SessionGuard, result: Result<T, ApiError>) -> Result<T, OrderError> {
    if matches!(result, Err(ApiError::Unauthorized)) {
        session.clear();
    }
    result.map_err(OrderError::from)
}

// NaN fails the positivity check like any non-positive value.
fn validate_new(order: &NewOrder) -> Result<(), OrderError> {
    if !(order.quantity > 0.0) {
        return Err(OrderError::InvalidQuantity);
    }
    if !(order.price > 0.0) {
        return Err(OrderError::InvalidPrice);
    }
    Ok(())
}

fn validate_patch(patch: &OrderPatch) -> Result<(), OrderError> {
    if let Some(quantity) = patch.quantity {
        if !(quantity > 0.0) {
            return Err(OrderError::InvalidQuantity);
        }
    }
    if let Some(price) = patch.price {
        if !(price > 0.0) {
            return Err(OrderError::InvalidPrice);
        }
    }
    Ok(())
}
