//! Postgres repository
//!
//! Runtime-checked sqlx queries over the schema in `migrations/`. Joined
//! views are assembled from a handful of set-based queries (`= ANY($1)`)
//! instead of one query per row.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::{BTreeSet, HashMap};

use super::error_helpers::{check_constraint_violation, ConstraintViolation};
use super::repository::{
    AirplaneRepository, AirplaneTypeRepository, AirportRepository, CrewRepository, FlightFilter,
    FlightRepository, OrderRepository, Repository, RouteRepository,
};
use super::{check_placements, health_check, DbError, DbResult};
use crate::booking::SeatConflict;
use crate::models::{
    Airplane, AirplaneDetails, AirplaneType, Airport, Crew, Flight, FlightDetails, NewAirplane,
    NewAirplaneType, NewAirport, NewCrew, NewFlight, NewOrder, NewRoute, NewTicket, Order,
    OrderWithTickets, Route, RouteDetails, SeatPosition, Ticket,
};

const ROUTE_SELECT: &str = r#"
    SELECT r.id, r.source_id, r.destination_id, r.distance,
           s.name AS source_name, s.closest_big_city AS source_city,
           d.name AS destination_name, d.closest_big_city AS destination_city
    FROM routes r
    JOIN airports s ON s.id = r.source_id
    JOIN airports d ON d.id = r.destination_id
    WHERE ($1::BIGINT[] IS NULL OR r.id = ANY($1))
    ORDER BY r.id
"#;

const AIRPLANE_SELECT: &str = r#"
    SELECT a.id, a.name, a.rows, a.seats_in_row, a.airplane_type_id,
           t.name AS type_name
    FROM airplanes a
    JOIN airplane_types t ON t.id = a.airplane_type_id
    WHERE ($1::BIGINT[] IS NULL OR a.id = ANY($1))
    ORDER BY a.id
"#;

const FLIGHT_SELECT: &str = r#"
    SELECT f.id, f.route_id, f.airplane_id, f.departure_time, f.arrival_time
    FROM flights f
    JOIN airplanes a ON a.id = f.airplane_id
    WHERE ($1::TEXT IS NULL OR a.name ILIKE '%' || $1 || '%')
      AND ($2::BIGINT[] IS NULL OR EXISTS (
            SELECT 1 FROM flight_crews fc
            WHERE fc.flight_id = f.id AND fc.crew_id = ANY($2)))
      AND ($3::BIGINT[] IS NULL OR f.id = ANY($3))
    ORDER BY f.id
"#;

const TICKET_COLUMNS: &str = r#"id, "row", seat, flight_id, order_id"#;

#[derive(FromRow)]
struct RouteRow {
    id: i64,
    source_id: i64,
    destination_id: i64,
    distance: i32,
    source_name: String,
    source_city: String,
    destination_name: String,
    destination_city: String,
}

impl From<RouteRow> for RouteDetails {
    fn from(row: RouteRow) -> Self {
        RouteDetails {
            route: Route {
                id: row.id,
                source_id: row.source_id,
                destination_id: row.destination_id,
                distance: row.distance,
            },
            source: Airport {
                id: row.source_id,
                name: row.source_name,
                closest_big_city: row.source_city,
            },
            destination: Airport {
                id: row.destination_id,
                name: row.destination_name,
                closest_big_city: row.destination_city,
            },
        }
    }
}

#[derive(FromRow)]
struct AirplaneRow {
    #[sqlx(flatten)]
    airplane: Airplane,
    type_name: String,
}

impl From<AirplaneRow> for AirplaneDetails {
    fn from(row: AirplaneRow) -> Self {
        AirplaneDetails {
            airplane_type: AirplaneType {
                id: row.airplane.airplane_type_id,
                name: row.type_name,
            },
            airplane: row.airplane,
        }
    }
}

#[derive(FromRow)]
struct FlightCrewRow {
    flight_id: i64,
    #[sqlx(flatten)]
    crew: Crew,
}

#[derive(FromRow)]
struct TakenSeatRow {
    flight_id: i64,
    #[sqlx(flatten)]
    position: SeatPosition,
}

#[derive(FromRow)]
struct FlightAirplaneRow {
    flight_id: i64,
    #[sqlx(flatten)]
    airplane: Airplane,
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn not_found_if_zero(rows_affected: u64, entity: &str, id: i64) -> DbResult<()> {
    if rows_affected == 0 {
        Err(DbError::not_found(entity, id))
    } else {
        Ok(())
    }
}

/// Map a foreign key violation on `entity` to `InvalidReference`
fn reference_error(err: sqlx::Error, refs: &[(&str, &'static str, i64)]) -> DbError {
    match check_constraint_violation(err) {
        violation @ ConstraintViolation::ForeignKey { .. } => {
            let constraint = violation.constraint().unwrap_or_default();
            refs.iter()
                .find(|(name, _, _)| *name == constraint)
                .or_else(|| refs.first())
                .map(|(_, entity, id)| DbError::invalid_reference(*entity, *id))
                .unwrap_or_else(|| DbError::Config(format!("unmapped constraint {constraint}")))
        },
        ConstraintViolation::Unique { constraint } => DbError::duplicate(
            "Row",
            constraint.as_deref().unwrap_or("unique constraint"),
        ),
        ConstraintViolation::Check { constraint } => {
            DbError::Constraint(constraint.unwrap_or_default())
        },
        ConstraintViolation::Other(e) => DbError::from(e),
    }
}

fn ticket_error(err: sqlx::Error, ticket: &NewTicket) -> DbError {
    match check_constraint_violation(err) {
        ConstraintViolation::Unique { .. } => DbError::SeatTaken(SeatConflict {
            flight: ticket.flight_id,
            row: ticket.row,
            seat: ticket.seat,
        }),
        ConstraintViolation::ForeignKey { .. } => {
            DbError::invalid_reference("Flight", ticket.flight_id)
        },
        ConstraintViolation::Check { constraint } => {
            DbError::Constraint(constraint.unwrap_or_default())
        },
        ConstraintViolation::Other(e) => DbError::from(e),
    }
}

/// Repository backed by a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn routes_by_ids(&self, ids: Option<&[i64]>) -> DbResult<Vec<RouteDetails>> {
        let rows: Vec<RouteRow> = sqlx::query_as(ROUTE_SELECT)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(RouteDetails::from).collect())
    }

    async fn airplanes_by_ids(&self, ids: Option<&[i64]>) -> DbResult<Vec<AirplaneDetails>> {
        let rows: Vec<AirplaneRow> = sqlx::query_as(AIRPLANE_SELECT)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(AirplaneDetails::from).collect())
    }

    /// Attach route, airplane, crew and taken seats to bare flight rows
    async fn hydrate_flights(&self, flights: Vec<Flight>) -> DbResult<Vec<FlightDetails>> {
        if flights.is_empty() {
            return Ok(Vec::new());
        }

        let flight_ids: Vec<i64> = flights.iter().map(|f| f.id).collect();
        let route_ids: Vec<i64> = flights.iter().map(|f| f.route_id).collect();
        let airplane_ids: Vec<i64> = flights.iter().map(|f| f.airplane_id).collect();

        let crew_query = async {
            let rows: Vec<FlightCrewRow> = sqlx::query_as(
                r#"
                SELECT fc.flight_id, c.id, c.first_name, c.last_name
                FROM flight_crews fc
                JOIN crews c ON c.id = fc.crew_id
                WHERE fc.flight_id = ANY($1)
                ORDER BY c.id
                "#,
            )
            .bind(&flight_ids)
            .fetch_all(&self.pool)
            .await?;
            DbResult::Ok(rows)
        };
        let seat_query = async {
            let rows: Vec<TakenSeatRow> = sqlx::query_as(
                r#"
                SELECT flight_id, "row", seat
                FROM tickets
                WHERE flight_id = ANY($1)
                ORDER BY "row", seat
                "#,
            )
            .bind(&flight_ids)
            .fetch_all(&self.pool)
            .await?;
            DbResult::Ok(rows)
        };

        let (routes, airplanes, crew_rows, seat_rows) = futures::try_join!(
            self.routes_by_ids(Some(route_ids.as_slice())),
            self.airplanes_by_ids(Some(airplane_ids.as_slice())),
            crew_query,
            seat_query,
        )?;

        let routes: HashMap<i64, RouteDetails> =
            routes.into_iter().map(|r| (r.route.id, r)).collect();
        let airplanes: HashMap<i64, AirplaneDetails> =
            airplanes.into_iter().map(|a| (a.airplane.id, a)).collect();

        let mut crews: HashMap<i64, Vec<Crew>> = HashMap::new();
        for row in crew_rows {
            crews.entry(row.flight_id).or_default().push(row.crew);
        }
        let mut seats: HashMap<i64, Vec<SeatPosition>> = HashMap::new();
        for row in seat_rows {
            seats.entry(row.flight_id).or_default().push(row.position);
        }

        flights
            .into_iter()
            .map(|mut flight| {
                let route = routes
                    .get(&flight.route_id)
                    .cloned()
                    .ok_or(DbError::invalid_reference("Route", flight.route_id))?;
                let airplane = airplanes
                    .get(&flight.airplane_id)
                    .cloned()
                    .ok_or(DbError::invalid_reference("Airplane", flight.airplane_id))?;
                let crew = crews.remove(&flight.id).unwrap_or_default();
                flight.crew_ids = crew.iter().map(|c| c.id).collect();
                let taken_places = seats.remove(&flight.id).unwrap_or_default();
                Ok(FlightDetails {
                    flight,
                    route,
                    airplane,
                    crew,
                    taken_places,
                })
            })
            .collect()
    }

    async fn tickets_for_orders(&self, orders: Vec<Order>) -> DbResult<Vec<OrderWithTickets>> {
        let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let tickets: Vec<Ticket> = sqlx::query_as(&format!(
            r#"SELECT {TICKET_COLUMNS} FROM tickets WHERE order_id = ANY($1) ORDER BY "row", seat, id"#
        ))
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i64, Vec<Ticket>> = HashMap::new();
        for ticket in tickets {
            by_order.entry(ticket.order_id).or_default().push(ticket);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderWithTickets {
                tickets: by_order.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    /// Replace a flight's crew links inside `tx`
    async fn write_crew(
        tx: &mut Transaction<'_, Postgres>,
        flight_id: i64,
        crew_ids: &[i64],
    ) -> DbResult<()> {
        let existing: Vec<i64> = sqlx::query_scalar("SELECT id FROM crews WHERE id = ANY($1)")
            .bind(crew_ids)
            .fetch_all(&mut **tx)
            .await?;
        if let Some(missing) = crew_ids.iter().find(|id| !existing.contains(id)) {
            return Err(DbError::invalid_reference("Crew", *missing));
        }

        sqlx::query("DELETE FROM flight_crews WHERE flight_id = $1")
            .bind(flight_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "INSERT INTO flight_crews (flight_id, crew_id) SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(flight_id)
        .bind(crew_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AirportRepository for PgRepository {
    async fn list_airports(&self) -> DbResult<Vec<Airport>> {
        Ok(
            sqlx::query_as("SELECT id, name, closest_big_city FROM airports ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_airport(&self, id: i64) -> DbResult<Option<Airport>> {
        Ok(
            sqlx::query_as("SELECT id, name, closest_big_city FROM airports WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_airport(&self, airport: NewAirport) -> DbResult<Airport> {
        Ok(sqlx::query_as(
            "INSERT INTO airports (name, closest_big_city) VALUES ($1, $2) \
             RETURNING id, name, closest_big_city",
        )
        .bind(&airport.name)
        .bind(&airport.closest_big_city)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_airport(&self, id: i64, airport: NewAirport) -> DbResult<Airport> {
        sqlx::query_as(
            "UPDATE airports SET name = $2, closest_big_city = $3 WHERE id = $1 \
             RETURNING id, name, closest_big_city",
        )
        .bind(id)
        .bind(&airport.name)
        .bind(&airport.closest_big_city)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Airport", id))
    }

    async fn delete_airport(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM airports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "Airport", id)
    }
}

#[async_trait]
impl RouteRepository for PgRepository {
    async fn list_routes(&self) -> DbResult<Vec<RouteDetails>> {
        self.routes_by_ids(None).await
    }

    async fn get_route(&self, id: i64) -> DbResult<Option<RouteDetails>> {
        Ok(self.routes_by_ids(Some(std::slice::from_ref(&id))).await?.into_iter().next())
    }

    async fn insert_route(&self, route: NewRoute) -> DbResult<Route> {
        sqlx::query_as(
            "INSERT INTO routes (source_id, destination_id, distance) VALUES ($1, $2, $3) \
             RETURNING id, source_id, destination_id, distance",
        )
        .bind(route.source_id)
        .bind(route.destination_id)
        .bind(route.distance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            reference_error(
                e,
                &[
                    ("routes_source_id_fkey", "Airport", route.source_id),
                    ("routes_destination_id_fkey", "Airport", route.destination_id),
                ],
            )
        })
    }

    async fn update_route(&self, id: i64, route: NewRoute) -> DbResult<Route> {
        sqlx::query_as(
            "UPDATE routes SET source_id = $2, destination_id = $3, distance = $4 WHERE id = $1 \
             RETURNING id, source_id, destination_id, distance",
        )
        .bind(id)
        .bind(route.source_id)
        .bind(route.destination_id)
        .bind(route.distance)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            reference_error(
                e,
                &[
                    ("routes_source_id_fkey", "Airport", route.source_id),
                    ("routes_destination_id_fkey", "Airport", route.destination_id),
                ],
            )
        })?
        .ok_or_else(|| DbError::not_found("Route", id))
    }

    async fn delete_route(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "Route", id)
    }
}

#[async_trait]
impl CrewRepository for PgRepository {
    async fn list_crews(&self) -> DbResult<Vec<Crew>> {
        Ok(
            sqlx::query_as("SELECT id, first_name, last_name FROM crews ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_crew(&self, id: i64) -> DbResult<Option<Crew>> {
        Ok(
            sqlx::query_as("SELECT id, first_name, last_name FROM crews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_crew(&self, crew: NewCrew) -> DbResult<Crew> {
        Ok(sqlx::query_as(
            "INSERT INTO crews (first_name, last_name) VALUES ($1, $2) \
             RETURNING id, first_name, last_name",
        )
        .bind(&crew.first_name)
        .bind(&crew.last_name)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_crew(&self, id: i64, crew: NewCrew) -> DbResult<Crew> {
        sqlx::query_as(
            "UPDATE crews SET first_name = $2, last_name = $3 WHERE id = $1 \
             RETURNING id, first_name, last_name",
        )
        .bind(id)
        .bind(&crew.first_name)
        .bind(&crew.last_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Crew", id))
    }

    async fn delete_crew(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM crews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "Crew", id)
    }
}

#[async_trait]
impl AirplaneTypeRepository for PgRepository {
    async fn list_airplane_types(&self) -> DbResult<Vec<AirplaneType>> {
        Ok(
            sqlx::query_as("SELECT id, name FROM airplane_types ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_airplane_type(&self, id: i64) -> DbResult<Option<AirplaneType>> {
        Ok(
            sqlx::query_as("SELECT id, name FROM airplane_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_airplane_type(
        &self,
        airplane_type: NewAirplaneType,
    ) -> DbResult<AirplaneType> {
        Ok(
            sqlx::query_as("INSERT INTO airplane_types (name) VALUES ($1) RETURNING id, name")
                .bind(&airplane_type.name)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn update_airplane_type(
        &self,
        id: i64,
        airplane_type: NewAirplaneType,
    ) -> DbResult<AirplaneType> {
        sqlx::query_as("UPDATE airplane_types SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(&airplane_type.name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("AirplaneType", id))
    }

    async fn delete_airplane_type(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM airplane_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "AirplaneType", id)
    }
}

#[async_trait]
impl AirplaneRepository for PgRepository {
    async fn list_airplanes(&self) -> DbResult<Vec<AirplaneDetails>> {
        self.airplanes_by_ids(None).await
    }

    async fn get_airplane(&self, id: i64) -> DbResult<Option<AirplaneDetails>> {
        Ok(self.airplanes_by_ids(Some(std::slice::from_ref(&id))).await?.into_iter().next())
    }

    async fn insert_airplane(&self, airplane: NewAirplane) -> DbResult<Airplane> {
        sqlx::query_as(
            "INSERT INTO airplanes (name, rows, seats_in_row, airplane_type_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, rows, seats_in_row, airplane_type_id",
        )
        .bind(&airplane.name)
        .bind(airplane.rows)
        .bind(airplane.seats_in_row)
        .bind(airplane.airplane_type_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            reference_error(
                e,
                &[(
                    "airplanes_airplane_type_id_fkey",
                    "AirplaneType",
                    airplane.airplane_type_id,
                )],
            )
        })
    }

    async fn update_airplane(&self, id: i64, airplane: NewAirplane) -> DbResult<Airplane> {
        sqlx::query_as(
            "UPDATE airplanes SET name = $2, rows = $3, seats_in_row = $4, airplane_type_id = $5 \
             WHERE id = $1 \
             RETURNING id, name, rows, seats_in_row, airplane_type_id",
        )
        .bind(id)
        .bind(&airplane.name)
        .bind(airplane.rows)
        .bind(airplane.seats_in_row)
        .bind(airplane.airplane_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            reference_error(
                e,
                &[(
                    "airplanes_airplane_type_id_fkey",
                    "AirplaneType",
                    airplane.airplane_type_id,
                )],
            )
        })?
        .ok_or_else(|| DbError::not_found("Airplane", id))
    }

    async fn delete_airplane(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM airplanes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "Airplane", id)
    }
}

#[async_trait]
impl FlightRepository for PgRepository {
    async fn list_flights(&self, filter: &FlightFilter) -> DbResult<Vec<FlightDetails>> {
        let flights: Vec<Flight> = sqlx::query_as(FLIGHT_SELECT)
            .bind(filter.airplane_name.as_deref().map(escape_like))
            .bind(filter.crew_ids.as_deref())
            .bind(filter.flight_ids.as_deref())
            .fetch_all(&self.pool)
            .await?;
        self.hydrate_flights(flights).await
    }

    async fn get_flight(&self, id: i64) -> DbResult<Option<FlightDetails>> {
        let filter = FlightFilter::by_ids(vec![id]);
        Ok(self.list_flights(&filter).await?.into_iter().next())
    }

    async fn insert_flight(&self, flight: NewFlight) -> DbResult<Flight> {
        let crew_ids = flight.crew_set();
        let mut tx = self.pool.begin().await?;

        let mut created: Flight = sqlx::query_as(
            "INSERT INTO flights (route_id, airplane_id, departure_time, arrival_time) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, route_id, airplane_id, departure_time, arrival_time",
        )
        .bind(flight.route_id)
        .bind(flight.airplane_id)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            reference_error(
                e,
                &[
                    ("flights_route_id_fkey", "Route", flight.route_id),
                    ("flights_airplane_id_fkey", "Airplane", flight.airplane_id),
                ],
            )
        })?;

        Self::write_crew(&mut tx, created.id, &crew_ids).await?;
        tx.commit().await?;

        created.crew_ids = crew_ids;
        Ok(created)
    }

    async fn update_flight(&self, id: i64, flight: NewFlight) -> DbResult<Flight> {
        let crew_ids = flight.crew_set();
        let mut tx = self.pool.begin().await?;

        let mut updated: Flight = sqlx::query_as(
            "UPDATE flights SET route_id = $2, airplane_id = $3, departure_time = $4, \
             arrival_time = $5 WHERE id = $1 \
             RETURNING id, route_id, airplane_id, departure_time, arrival_time",
        )
        .bind(id)
        .bind(flight.route_id)
        .bind(flight.airplane_id)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            reference_error(
                e,
                &[
                    ("flights_route_id_fkey", "Route", flight.route_id),
                    ("flights_airplane_id_fkey", "Airplane", flight.airplane_id),
                ],
            )
        })?
        .ok_or_else(|| DbError::not_found("Flight", id))?;

        Self::write_crew(&mut tx, id, &crew_ids).await?;
        tx.commit().await?;

        updated.crew_ids = crew_ids;
        Ok(updated)
    }

    async fn delete_flight(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "Flight", id)
    }

    async fn airplanes_for_flights(&self, flight_ids: &[i64]) -> DbResult<HashMap<i64, Airplane>> {
        let rows: Vec<FlightAirplaneRow> = sqlx::query_as(
            r#"
            SELECT f.id AS flight_id,
                   a.id, a.name, a.rows, a.seats_in_row, a.airplane_type_id
            FROM flights f
            JOIN airplanes a ON a.id = f.airplane_id
            WHERE f.id = ANY($1)
            "#,
        )
        .bind(flight_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| (r.flight_id, r.airplane)).collect())
    }
}

#[async_trait]
impl OrderRepository for PgRepository {
    async fn list_orders(&self, customer: Option<&str>) -> DbResult<Vec<OrderWithTickets>> {
        let orders: Vec<Order> = sqlx::query_as(
            "SELECT id, created_at, customer FROM orders \
             WHERE ($1::TEXT IS NULL OR customer = $1) \
             ORDER BY id",
        )
        .bind(customer)
        .fetch_all(&self.pool)
        .await?;
        self.tickets_for_orders(orders).await
    }

    async fn get_order(&self, id: i64) -> DbResult<Option<OrderWithTickets>> {
        let order: Option<Order> =
            sqlx::query_as("SELECT id, created_at, customer FROM orders WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        match order {
            Some(order) => Ok(self.tickets_for_orders(vec![order]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn create_order(&self, order: NewOrder) -> DbResult<OrderWithTickets> {
        let mut tx = self.pool.begin().await?;

        // Grids may not change under the tickets until commit
        let flight_ids: Vec<i64> = order
            .tickets
            .iter()
            .map(|t| t.flight_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let rows: Vec<FlightAirplaneRow> = sqlx::query_as(
            r#"
            SELECT f.id AS flight_id,
                   a.id, a.name, a.rows, a.seats_in_row, a.airplane_type_id
            FROM flights f
            JOIN airplanes a ON a.id = f.airplane_id
            WHERE f.id = ANY($1)
            FOR SHARE
            "#,
        )
        .bind(&flight_ids)
        .fetch_all(&mut *tx)
        .await?;
        let airplanes: HashMap<i64, Airplane> =
            rows.into_iter().map(|r| (r.flight_id, r.airplane)).collect();
        check_placements(&order.tickets, &airplanes)?;

        let created: Order = sqlx::query_as(
            "INSERT INTO orders (customer) VALUES ($1) RETURNING id, created_at, customer",
        )
        .bind(&order.customer)
        .fetch_one(&mut *tx)
        .await?;

        let insert_ticket = format!(
            r#"INSERT INTO tickets ("row", seat, flight_id, order_id) VALUES ($1, $2, $3, $4)
               RETURNING {TICKET_COLUMNS}"#
        );
        let mut tickets = Vec::with_capacity(order.tickets.len());
        for request in &order.tickets {
            // Dropping `tx` on error rolls the order back
            let ticket: Ticket = sqlx::query_as(&insert_ticket)
                .bind(request.row)
                .bind(request.seat)
                .bind(request.flight_id)
                .bind(created.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| ticket_error(e, request))?;
            tickets.push(ticket);
        }

        tx.commit().await?;

        tickets.sort_by_key(|t| (t.row, t.seat, t.id));
        Ok(OrderWithTickets {
            order: created,
            tickets,
        })
    }

    async fn delete_order(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_if_zero(result.rows_affected(), "Order", id)
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> DbResult<()> {
        health_check(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
