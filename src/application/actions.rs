//! Mutation wrappers.
//!
//! Each action runs one write through its service, hands the envelope to
//! the [`Revalidator`], and returns the envelope unchanged.

use medistore_api_types::{CreateOrder, CreateReview, Envelope, Payload, ReplyReview, UpdateOrderStatus};

use crate::cache::Revalidator;
use crate::domain::mutations::Mutation;
use crate::domain::session::Session;

use super::services::{CategoryService, MedicineService, OrderService, ReviewService};

#[derive(Clone)]
pub struct Actions {
    categories: CategoryService,
    medicines: MedicineService,
    orders: OrderService,
    reviews: ReviewService,
    revalidator: Revalidator,
}

impl Actions {
    pub fn new(
        categories: CategoryService,
        medicines: MedicineService,
        orders: OrderService,
        reviews: ReviewService,
        revalidator: Revalidator,
    ) -> Self {
        Self {
            categories,
            medicines,
            orders,
            reviews,
            revalidator,
        }
    }

    fn settle(&self, mutation: &Mutation, envelope: Envelope<Payload>) -> Envelope<Payload> {
        self.revalidator.after(mutation, &envelope);
        envelope
    }

    pub async fn create_category(
        &self,
        session: Option<&Session>,
        payload: &Payload,
    ) -> Envelope<Payload> {
        let envelope = self.categories.create(session, payload).await;
        self.settle(&Mutation::CreateCategory, envelope)
    }

    pub async fn update_category(
        &self,
        session: Option<&Session>,
        id: &str,
        partial: &Payload,
    ) -> Envelope<Payload> {
        let envelope = self.categories.update(session, id, partial).await;
        self.settle(&Mutation::UpdateCategory, envelope)
    }

    pub async fn delete_category(&self, session: Option<&Session>, id: &str) -> Envelope<Payload> {
        let envelope = self.categories.delete(session, id).await;
        self.settle(&Mutation::DeleteCategory, envelope)
    }

    pub async fn create_medicine(
        &self,
        session: Option<&Session>,
        payload: &Payload,
    ) -> Envelope<Payload> {
        let envelope = self.medicines.create(session, payload).await;
        self.settle(&Mutation::CreateMedicine, envelope)
    }

    pub async fn update_medicine(
        &self,
        session: Option<&Session>,
        id: &str,
        partial: &Payload,
    ) -> Envelope<Payload> {
        let envelope = self.medicines.update(session, id, partial).await;
        self.settle(&Mutation::UpdateMedicine, envelope)
    }

    pub async fn delete_medicine(&self, session: Option<&Session>, id: &str) -> Envelope<Payload> {
        let envelope = self.medicines.delete(session, id).await;
        self.settle(&Mutation::DeleteMedicine, envelope)
    }

    pub async fn create_order(
        &self,
        session: Option<&Session>,
        order: &CreateOrder,
    ) -> Envelope<Payload> {
        let envelope = self.orders.create(session, order).await;
        self.settle(&Mutation::CreateOrder, envelope)
    }

    pub async fn cancel_order(&self, session: Option<&Session>, id: &str) -> Envelope<Payload> {
        let envelope = self.orders.cancel(session, id).await;
        self.settle(&Mutation::CancelOrder, envelope)
    }

    pub async fn update_order_status(
        &self,
        session: Option<&Session>,
        id: &str,
        update: &UpdateOrderStatus,
    ) -> Envelope<Payload> {
        let envelope = self.orders.update_status(session, id, update).await;
        self.settle(&Mutation::UpdateOrderStatus, envelope)
    }

    pub async fn create_review(
        &self,
        session: Option<&Session>,
        review: &CreateReview,
    ) -> Envelope<Payload> {
        let envelope = self.reviews.create(session, review).await;
        let mutation = Mutation::CreateReview {
            medicine_id: review.medicine_id.trim().to_string(),
        };
        self.settle(&mutation, envelope)
    }

    pub async fn reply_review(
        &self,
        session: Option<&Session>,
        id: &str,
        reply: &ReplyReview,
    ) -> Envelope<Payload> {
        let envelope = self.reviews.reply(session, id, reply).await;
        self.settle(&Mutation::ReplyReview, envelope)
    }

    pub async fn delete_review(&self, session: Option<&Session>, id: &str) -> Envelope<Payload> {
        let envelope = self.reviews.delete(session, id).await;
        self.settle(&Mutation::DeleteReview, envelope)
    }
}
