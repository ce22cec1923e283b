//! Customer operations.
//!
//! Each operation maps to exactly one Openpay REST call. Customers returned
//! from any of them carry the [`Merchant`] they were fetched through.

use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::error::ClientError;
use crate::merchant::Merchant;
use crate::types::{Charge, ChargeArgs, Customer, CustomerArgs};

const CUSTOMERS: &str = "customers";

impl Merchant {
    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn add_customer(&self, args: &CustomerArgs) -> Result<Customer, ClientError> {
        let client = self.client();
        let request = client.new_request(Method::POST, &[CUSTOMERS], Some(args))?;
        let customer: Customer = client.perform(request).await?;

        tracing::debug!(customer_id = %customer.id, "Created Openpay customer");

        Ok(customer.with_merchant(self.clone()))
    }

    /// List customers, in the order Openpay returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ClientError> {
        let client = self.client();
        let request = client.new_request::<()>(Method::GET, &[CUSTOMERS], None)?;
        let customers: Vec<Customer> = client.perform(request).await?;

        Ok(customers
            .into_iter()
            .map(|customer| customer.with_merchant(self.clone()))
            .collect())
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidId`] for an empty, `.` or `..` ID, or an
    /// error if the request fails or the server returns an error.
    pub async fn get_customer(&self, id: &str) -> Result<Customer, ClientError> {
        let customer: Customer = self
            .perform_customer_operation(Method::GET, id, &[], None::<&()>)
            .await?;
        Ok(customer.with_merchant(self.clone()))
    }

    /// Update a customer.
    ///
    /// Only the writable fields of `data` are sent; see [`Customer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update_customer(
        &self,
        id: &str,
        data: &Customer,
    ) -> Result<Customer, ClientError> {
        let customer: Customer = self
            .perform_customer_operation(Method::PUT, id, &[], Some(data))
            .await?;
        Ok(customer.with_merchant(self.clone()))
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn delete_customer(&self, id: &str) -> Result<(), ClientError> {
        let _: IgnoredAny = self
            .perform_customer_operation(Method::DELETE, id, &[], None::<&()>)
            .await?;
        Ok(())
    }

    /// Send `body` to `customers/{id}/{rest...}` and decode the response into
    /// `T`. `id` always occupies exactly one path segment.
    async fn perform_customer_operation<B, T>(
        &self,
        method: Method,
        id: &str,
        rest: &[&str],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::InvalidId(id.to_string()));
        }

        let mut segments = vec![CUSTOMERS, id];
        segments.extend_from_slice(rest);

        let client = self.client();
        let request = client.new_request(method, &segments, body)?;
        client.perform(request).await
    }
}

impl Customer {
    /// Charge this customer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingMerchant`] if no merchant is attached,
    /// [`ClientError::InvalidId`] if the customer has no usable ID, otherwise
    /// an error if the request fails or the server returns an error.
    /// A charge declined by Openpay is an error; a returned [`Charge`] may
    /// still carry an `error_message`, see [`Charge::is_failed`].
    pub async fn charge(&self, args: &ChargeArgs) -> Result<Charge, ClientError> {
        self.charge_as(args).await
    }

    /// Charge this customer with an arbitrary body, decoding the response
    /// into `T`.
    ///
    /// Useful for charge shapes not modelled by [`ChargeArgs`] / [`Charge`].
    ///
    /// # Errors
    ///
    /// Same as [`Customer::charge`].
    pub async fn charge_as<B, T>(&self, data: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let merchant = self.merchant.as_ref().ok_or(ClientError::MissingMerchant)?;

        tracing::debug!(customer_id = %self.id, "Charging Openpay customer");

        merchant
            .perform_customer_operation(Method::POST, &self.id, &["charges"], Some(data))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChargeMethod;

    #[tokio::test]
    async fn charge_without_merchant_fails_before_any_request() {
        let customer = Customer {
            id: "cust_1".into(),
            ..Customer::default()
        };
        let args = ChargeArgs::card("tok_1", 10.0, "test", "dev_1");

        let err = customer.charge(&args).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingMerchant));
        assert_eq!(args.method, ChargeMethod::Card);
    }

    #[tokio::test]
    async fn charge_as_without_merchant_fails() {
        let customer = Customer::default();
        let result: Result<serde_json::Value, _> =
            customer.charge_as(&serde_json::json!({"amount": 1})).await;
        assert!(matches!(result, Err(ClientError::MissingMerchant)));
    }

    #[tokio::test]
    async fn ids_that_cannot_name_one_customer_are_rejected() {
        let merchant = Merchant::new("m123", "sk_test").unwrap();

        for id in ["", ".", ".."] {
            let err = merchant.delete_customer(id).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidId(ref bad) if bad == id));
        }

        let customer = Customer::default().with_merchant(merchant);
        let err = customer
            .charge(&ChargeArgs::store(10.0, "test"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidId(_)));
    }
}
