use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Error body in the shape the Clayful API uses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    pub validation: Option<Value>,
}

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, code: &str, message: &str, validation: Option<Value>) -> ApiFailure {
    (
        status,
        Json(ErrorBody {
            error_code: code.to_string(),
            message: message.to_string(),
            validation,
        }),
    )
}

fn not_found() -> ApiFailure {
    failure(StatusCode::NOT_FOUND, "g-no-model", "Product not found.", None)
}

pub type Db = Arc<RwLock<HashMap<Uuid, Product>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/v1/products", get(list_products).post(create_product))
        .route(
            "/v1/products/{productId}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/v1/echo", any(echo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Product>> {
    let products = db.read().await;
    let mut list: Vec<Product> = products.values().cloned().collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(limit) = query.limit {
        list.truncate(limit);
    }
    Json(list)
}

async fn create_product(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), ApiFailure> {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized {
        return Err(failure(
            StatusCode::UNAUTHORIZED,
            "g-invalid-client",
            "Client token is required.",
            None,
        ));
    }
    if input.name.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "g-validation",
            "Invalid payload.",
            Some(json!({"name": "required"})),
        ));
    }

    let product = Product {
        id: Uuid::new_v4(),
        name: input.name,
        price: input.price,
    };
    db.write().await.insert(product.id, product.clone());
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Product>, ApiFailure> {
    let products = db.read().await;
    products.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, ApiFailure> {
    let mut products = db.write().await;
    let product = products.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    Ok(Json(product.clone()))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiFailure> {
    let mut products = db.write().await;
    products
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}

/// Reflect the request back so clients can check what went over the wire.
async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string())))
        .collect();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "query": query,
        "body": body,
    }))
}
