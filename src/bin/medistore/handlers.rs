use medistore::api_types::{CreateOrder, CreateReview, Envelope, ReplyReview, UpdateOrderStatus};
use medistore::cache::CacheDirective;
use serde::Serialize;
use serde_json::Value;

use crate::args::{BlogsCmd, CategoriesCmd, Commands, ListOpts, MedicinesCmd, OrdersCmd, ReviewsCmd};
use crate::client::{CliError, Ctx};
use crate::io::{parse_params, read_payload, read_typed};

/// An envelope ready to print, plus whether it carried data.
#[derive(Debug)]
pub struct Rendered {
    pub body: Value,
    pub ok: bool,
}

fn render<T: Serialize>(envelope: Envelope<T>) -> Result<Rendered, CliError> {
    Ok(Rendered {
        ok: envelope.is_ok(),
        body: serde_json::to_value(&envelope)?,
    })
}

pub async fn dispatch(ctx: &Ctx, command: Commands) -> Result<Rendered, CliError> {
    match command {
        Commands::Categories { action } => categories(ctx, action).await,
        Commands::Medicines { action } => medicines(ctx, action).await,
        Commands::Orders { action } => orders(ctx, action).await,
        Commands::Reviews { action } => reviews(ctx, action).await,
        Commands::Blogs { action } => blogs(ctx, action).await,
        Commands::Home { cache } => render(ctx.storefront.home.get(cache.directive()).await),
    }
}

async fn categories(ctx: &Ctx, cmd: CategoriesCmd) -> Result<Rendered, CliError> {
    let store = &ctx.storefront;
    match cmd {
        CategoriesCmd::List(list) => {
            let params = parse_params(&list.params)?;
            render(store.categories.list(&params, list.cache.directive()).await)
        }
        CategoriesCmd::Dropdown(cache) => {
            render(store.categories.dropdown(cache.directive()).await)
        }
        CategoriesCmd::Get { id } => render(store.categories.get(&id).await),
        CategoriesCmd::Create(payload) => {
            let payload = read_payload(payload)?;
            render(store.actions.create_category(ctx.session(), &payload).await)
        }
        CategoriesCmd::Update { id, payload } => {
            let payload = read_payload(payload)?;
            render(
                store
                    .actions
                    .update_category(ctx.session(), &id, &payload)
                    .await,
            )
        }
        CategoriesCmd::Delete { id } => {
            render(store.actions.delete_category(ctx.session(), &id).await)
        }
    }
}

async fn medicines(ctx: &Ctx, cmd: MedicinesCmd) -> Result<Rendered, CliError> {
    let store = &ctx.storefront;
    match cmd {
        MedicinesCmd::List(list) => {
            let params = parse_params(&list.params)?;
            render(store.medicines.list(&params, list.cache.directive()).await)
        }
        MedicinesCmd::Mine(list) => {
            let params = parse_params(&list.params)?;
            render(
                store
                    .medicines
                    .mine(ctx.session(), &params, list.cache.directive())
                    .await,
            )
        }
        MedicinesCmd::Get { id } => render(store.medicines.get(&id).await),
        MedicinesCmd::Create(payload) => {
            let payload = read_payload(payload)?;
            render(store.actions.create_medicine(ctx.session(), &payload).await)
        }
        MedicinesCmd::Update { id, payload } => {
            let payload = read_payload(payload)?;
            render(
                store
                    .actions
                    .update_medicine(ctx.session(), &id, &payload)
                    .await,
            )
        }
        MedicinesCmd::Delete { id } => {
            render(store.actions.delete_medicine(ctx.session(), &id).await)
        }
    }
}

async fn orders(ctx: &Ctx, cmd: OrdersCmd) -> Result<Rendered, CliError> {
    let store = &ctx.storefront;
    let session = ctx.session();
    match cmd {
        OrdersCmd::All(list) => {
            let params = parse_params(&list.params)?;
            render(store.orders.all(session, &params, list.cache.directive()).await)
        }
        OrdersCmd::Mine(list) => {
            let params = parse_params(&list.params)?;
            render(store.orders.mine(session, &params, list.cache.directive()).await)
        }
        OrdersCmd::Seller(list) => {
            let params = parse_params(&list.params)?;
            render(store.orders.seller(session, &params, list.cache.directive()).await)
        }
        OrdersCmd::Get { id } => {
            render(store.orders.get(session, &id, CacheDirective::default()).await)
        }
        OrdersCmd::Create(payload) => {
            let order: CreateOrder = read_typed(payload)?;
            render(store.actions.create_order(session, &order).await)
        }
        OrdersCmd::Cancel { id } => render(store.actions.cancel_order(session, &id).await),
        OrdersCmd::Status { id, status } => {
            let update = UpdateOrderStatus { status };
            render(
                store
                    .actions
                    .update_order_status(session, &id, &update)
                    .await,
            )
        }
    }
}

async fn reviews(ctx: &Ctx, cmd: ReviewsCmd) -> Result<Rendered, CliError> {
    let store = &ctx.storefront;
    let session = ctx.session();
    match cmd {
        ReviewsCmd::ForMedicine { medicine_id, list } => {
            let params = parse_params(&list.params)?;
            render(
                store
                    .reviews
                    .for_medicine(&medicine_id, &params, list.cache.directive())
                    .await,
            )
        }
        ReviewsCmd::Mine(list) => scoped_reviews(ctx, &list, false).await,
        ReviewsCmd::Seller(list) => scoped_reviews(ctx, &list, true).await,
        ReviewsCmd::Create {
            medicine_id,
            rating,
            comment,
        } => {
            let review = CreateReview {
                medicine_id,
                rating,
                comment,
            };
            render(store.actions.create_review(session, &review).await)
        }
        ReviewsCmd::Reply { id, comment } => {
            let reply = ReplyReview { comment };
            render(store.actions.reply_review(session, &id, &reply).await)
        }
        ReviewsCmd::Delete { id } => render(store.actions.delete_review(session, &id).await),
    }
}

async fn scoped_reviews(ctx: &Ctx, list: &ListOpts, seller: bool) -> Result<Rendered, CliError> {
    let params = parse_params(&list.params)?;
    let directive = list.cache.directive();
    let reviews = &ctx.storefront.reviews;
    let envelope = if seller {
        reviews.seller(ctx.session(), &params, directive).await
    } else {
        reviews.mine(ctx.session(), &params, directive).await
    };
    render(envelope)
}

async fn blogs(ctx: &Ctx, cmd: BlogsCmd) -> Result<Rendered, CliError> {
    let blogs = &ctx.storefront.blogs;
    match cmd {
        BlogsCmd::List(list) => {
            let params = parse_params(&list.params)?;
            render(blogs.list(&params, list.cache.directive()).await)
        }
        BlogsCmd::Get { id, cache } => render(blogs.get(&id, cache.directive()).await),
    }
}
