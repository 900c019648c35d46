use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::customer_dto::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::models::customer::Customer;
use crate::utils::errors::{db_error, not_found_error, AppError, AppResult};

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<Customer> {
        let now = Utc::now();
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                id, dealer_id, name, email, phone, business_type, work_category, address,
                contact_person, emergency_contact, frequently_rented_machines, outstanding_dues,
                total_rentals, total_spent, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 0, 0, $13, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.dealer_id)
        .bind(request.name.trim())
        .bind(request.email.trim().to_lowercase())
        .bind(request.phone.trim())
        .bind(request.business_type.trim())
        .bind(request.work_category.trim())
        .bind(request.address.trim())
        .bind(request.contact_person.trim())
        .bind(request.emergency_contact.trim())
        .bind(&request.frequently_rented_machines)
        .bind(request.outstanding_dues.unwrap_or(Decimal::ZERO))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating customer", e))?;

        Ok(customer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding customer", e))
    }

    pub async fn list(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE ($1::uuid IS NULL OR dealer_id = $1) ORDER BY created_at DESC",
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing customers", e))
    }

    /// Actualización parcial con la fila bloqueada: un checkout o un pago
    /// concurrente no puede perderse al reescribir la deuda
    pub async fn update(&self, id: Uuid, request: UpdateCustomerRequest) -> AppResult<Customer> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting customer update", e))?;

        let mut customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("locking customer", e))?
            .ok_or_else(|| not_found_error("Customer", id))?;

        request.apply_to(&mut customer);

        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4, business_type = $5, work_category = $6,
                address = $7, contact_person = $8, emergency_contact = $9,
                frequently_rented_machines = $10, outstanding_dues = $11, updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer.name)
        .bind(customer.email)
        .bind(customer.phone)
        .bind(customer.business_type)
        .bind(customer.work_category)
        .bind(customer.address)
        .bind(customer.contact_person)
        .bind(customer.emergency_contact)
        .bind(customer.frequently_rented_machines)
        .bind(customer.outstanding_dues)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("updating customer", e))?;

        tx.commit().await.map_err(|e| db_error("committing customer update", e))?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting customer", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Customer", id));
        }
        Ok(())
    }

    /// Registra un pago: reduce la deuda y suma al total gastado.
    /// El importe no puede superar la deuda pendiente.
    pub async fn record_payment(&self, id: Uuid, amount: Decimal) -> AppResult<Customer> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", id))?;

        if amount > current.outstanding_dues {
            return Err(AppError::BadRequest(format!(
                "Payment of {} exceeds outstanding dues of {}",
                amount, current.outstanding_dues
            )));
        }

        // La condición en el WHERE protege contra pagos concurrentes
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET outstanding_dues = outstanding_dues - $2,
                total_spent = total_spent + $2,
                updated_at = $3
            WHERE id = $1 AND outstanding_dues >= $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("recording payment", e))?
        .ok_or_else(|| AppError::Conflict("Outstanding dues changed, retry the payment".to_string()))
    }
}
