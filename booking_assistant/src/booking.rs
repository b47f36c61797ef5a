// Submits a booking to the dispatch order endpoint.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{error, info};

use crate::authentication;
use crate::config::Config;
use crate::endpoints::dispatch;
use crate::error::{Error, Result};
use crate::json;
use crate::order::BookingOrder;
use crate::retrieve::fetch;

#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub order_id: String,
    pub response: Value,
}

/// Posts the order once.  There is nothing to roll back if it fails and
/// it's never retried.
pub fn submit(client: &Client, config: &Config, token: &str, order: &BookingOrder) -> Result<Receipt> {
    let endpoint = dispatch::orders(&config.order_url);
    let authentication = authentication::dispatch(token);
    let response = fetch::post_json(client, &endpoint, &authentication, order)?;
    let status = response.status();
    let body = response.text()?;

    match receipt_from_response(status, &body) {
        Ok(receipt) => {
            info!("booked order {}", receipt.order_id);
            Ok(receipt)
        }
        Err(e) => {
            error!("booking rejected: {}", e);
            Err(e)
        }
    }
}

// A booking only succeeded if we got a 200 back along with the id the
// dispatcher assigned it, under `order.order_id`.
pub fn receipt_from_response(status: StatusCode, body: &str) -> Result<Receipt> {
    if status != StatusCode::OK {
        return Err(Error::Booking {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let response: Value =
        serde_json::from_str(body).map_err(|_| Error::MissingOrderId(body.to_string()))?;
    let order_id = json::id_from_value(&response["order"], "order_id")
        .ok_or_else(|| Error::MissingOrderId(body.to_string()))?;

    Ok(Receipt { order_id, response })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_order_id() {
        let receipt = receipt_from_response(
            StatusCode::OK,
            r#"{"order": {"order_id": "A1B2C3", "status": "pending"}}"#,
        )
        .unwrap();
        assert_eq!(receipt.order_id, "A1B2C3");
        assert_eq!(receipt.response["order"]["status"], "pending");

        let receipt = receipt_from_response(StatusCode::OK, r#"{"order": {"order_id": 9001}}"#).unwrap();
        assert_eq!(receipt.order_id, "9001");
    }

    #[test]
    fn rejected_bookings_keep_the_body() {
        match receipt_from_response(StatusCode::BAD_REQUEST, r#"{"error": "bad pts"}"#) {
            Err(Error::Booking { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"error": "bad pts"}"#);
            }
            other => panic!("unexpected {:?}", other),
        }

        // Created isn't what the api sends on success, so treat it as a failure too.
        assert!(matches!(
            receipt_from_response(StatusCode::CREATED, r#"{"order": {"order_id": 1}}"#),
            Err(Error::Booking { status: 201, .. })
        ));
    }

    #[test]
    fn ok_without_an_order_id() {
        for body in &[r#"{"order": {}}"#, r#"{"result": "ok"}"#, "", "<html>"] {
            assert!(
                matches!(
                    receipt_from_response(StatusCode::OK, body),
                    Err(Error::MissingOrderId(_))
                ),
                "{}",
                body
            );
        }
    }
}
