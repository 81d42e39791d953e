use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

/// Mount point of the employee resource.
pub const API_PREFIX: &str = "/api/employees";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    employees: BTreeMap<i64, Employee>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastNameQuery {
    pub last_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryQuery {
    pub min_salary: f64,
}

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: i32,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(API_PREFIX, get(list_employees).post(create_employee))
        .route(
            &format!("{API_PREFIX}/{{id}}"),
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(&format!("{API_PREFIX}/search"), get(search_by_last_name))
        .route(&format!("{API_PREFIX}/salary"), get(salary_greater_than))
        .route(&format!("{API_PREFIX}/hired-in-year"), get(hired_in_year))
        .route(&format!("{API_PREFIX}/department/{{department}}"), get(by_department))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(State(db): State<Db>) -> Json<Vec<Employee>> {
    let store = db.read().await;
    Json(store.employees.values().cloned().collect())
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), StatusCode> {
    validate(&input)?;
    let mut store = db.write().await;
    store.next_id += 1;
    let employee = Employee {
        id: store.next_id,
        ..input
    };
    store.employees.insert(employee.id, employee.clone());
    tracing::info!(id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, StatusCode> {
    let store = db.read().await;
    store.employees.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replace of every field except `id`.
async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<Employee>,
) -> Result<Json<Employee>, StatusCode> {
    validate(&input)?;
    let mut store = db.write().await;
    let employee = store.employees.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *employee = Employee { id, ..input };
    Ok(Json(employee.clone()))
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.employees.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn search_by_last_name(
    State(db): State<Db>,
    Query(query): Query<LastNameQuery>,
) -> Json<Vec<Employee>> {
    let needle = query.last_name.to_lowercase();
    filtered(&db, |e| e.last_name.to_lowercase().contains(&needle)).await
}

async fn salary_greater_than(
    State(db): State<Db>,
    Query(query): Query<SalaryQuery>,
) -> Json<Vec<Employee>> {
    filtered(&db, |e| e.salary.is_some_and(|s| s > query.min_salary)).await
}

async fn hired_in_year(State(db): State<Db>, Query(query): Query<YearQuery>) -> Json<Vec<Employee>> {
    filtered(&db, |e| e.hire_date.is_some_and(|d| d.year() == query.year)).await
}

async fn by_department(
    State(db): State<Db>,
    Path(department): Path<String>,
) -> Json<Vec<Employee>> {
    filtered(&db, |e| e.department.as_deref() == Some(department.as_str())).await
}

async fn filtered(db: &Db, keep: impl Fn(&Employee) -> bool) -> Json<Vec<Employee>> {
    let store = db.read().await;
    Json(store.employees.values().filter(|e| keep(e)).cloned().collect())
}

fn validate(input: &Employee) -> Result<(), StatusCode> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if input.salary.is_some_and(|s| s < 0.0) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(())
}
