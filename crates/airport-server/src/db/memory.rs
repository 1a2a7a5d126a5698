//! In-process repository
//!
//! All tables live behind one `tokio::sync::RwLock`. Every write takes the
//! write lock for its whole check-then-mutate sequence, which gives the same
//! guarantees the Postgres transaction and unique index give: an order is
//! stored with all of its tickets or not at all, and a seat is sold once.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::repository::{
    AirplaneRepository, AirplaneTypeRepository, AirportRepository, CrewRepository, FlightFilter,
    FlightRepository, OrderRepository, Repository, RouteRepository,
};
use super::{check_placements, DbError, DbResult};
use crate::booking::SeatConflict;
use crate::models::{
    Airplane, AirplaneDetails, AirplaneType, Airport, Crew, Flight, FlightDetails, NewAirplane,
    NewAirplaneType, NewAirport, NewCrew, NewFlight, NewOrder, NewRoute, Order,
    OrderWithTickets, Route, RouteDetails, SeatPosition, Ticket,
};

/// Rows keyed by id plus the last id handed out
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    fn ids_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<i64> {
        self.rows
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[derive(Debug, Default)]
struct Store {
    airports: Table<Airport>,
    routes: Table<Route>,
    crews: Table<Crew>,
    airplane_types: Table<AirplaneType>,
    airplanes: Table<Airplane>,
    flights: Table<Flight>,
    orders: Table<Order>,
    tickets: Table<Ticket>,
}

impl Store {
    fn require<T: Clone>(table: &Table<T>, entity: &'static str, id: i64) -> DbResult<()> {
        if table.contains(id) {
            Ok(())
        } else {
            Err(DbError::invalid_reference(entity, id))
        }
    }

    fn route_details(&self, route: &Route) -> DbResult<RouteDetails> {
        let airport = |id| {
            self.airports
                .get(id)
                .cloned()
                .ok_or(DbError::invalid_reference("Airport", id))
        };
        Ok(RouteDetails {
            route: route.clone(),
            source: airport(route.source_id)?,
            destination: airport(route.destination_id)?,
        })
    }

    fn airplane_details(&self, airplane: &Airplane) -> DbResult<AirplaneDetails> {
        let airplane_type = self
            .airplane_types
            .get(airplane.airplane_type_id)
            .cloned()
            .ok_or(DbError::invalid_reference(
                "AirplaneType",
                airplane.airplane_type_id,
            ))?;
        Ok(AirplaneDetails {
            airplane: airplane.clone(),
            airplane_type,
        })
    }

    fn flight_details(&self, flight: &Flight) -> DbResult<FlightDetails> {
        let route = self
            .routes
            .get(flight.route_id)
            .ok_or(DbError::invalid_reference("Route", flight.route_id))?;
        let airplane = self
            .airplanes
            .get(flight.airplane_id)
            .ok_or(DbError::invalid_reference("Airplane", flight.airplane_id))?;

        let crew = flight
            .crew_ids
            .iter()
            .filter_map(|id| self.crews.get(*id).cloned())
            .collect();

        let mut taken_places: Vec<SeatPosition> = self
            .tickets
            .values()
            .filter(|t| t.flight_id == flight.id)
            .map(|t| SeatPosition {
                row: t.row,
                seat: t.seat,
            })
            .collect();
        taken_places.sort();

        Ok(FlightDetails {
            flight: flight.clone(),
            route: self.route_details(route)?,
            airplane: self.airplane_details(airplane)?,
            crew,
            taken_places,
        })
    }

    fn order_with_tickets(&self, order: &Order) -> OrderWithTickets {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .values()
            .filter(|t| t.order_id == order.id)
            .cloned()
            .collect();
        tickets.sort_by_key(|t| (t.row, t.seat, t.id));
        OrderWithTickets {
            order: order.clone(),
            tickets,
        }
    }

    fn check_route_refs(&self, route: &NewRoute) -> DbResult<()> {
        Self::require(&self.airports, "Airport", route.source_id)?;
        Self::require(&self.airports, "Airport", route.destination_id)
    }

    fn check_flight_refs(&self, flight: &NewFlight) -> DbResult<()> {
        Self::require(&self.routes, "Route", flight.route_id)?;
        Self::require(&self.airplanes, "Airplane", flight.airplane_id)?;
        for crew_id in &flight.crew_ids {
            Self::require(&self.crews, "Crew", *crew_id)?;
        }
        Ok(())
    }

    // Cascades mirror the ON DELETE rules of the SQL schema.

    fn remove_airport(&mut self, id: i64) -> bool {
        if self.airports.rows.remove(&id).is_none() {
            return false;
        }
        for route_id in self
            .routes
            .ids_where(|r| r.source_id == id || r.destination_id == id)
        {
            self.remove_route(route_id);
        }
        true
    }

    fn remove_route(&mut self, id: i64) -> bool {
        if self.routes.rows.remove(&id).is_none() {
            return false;
        }
        for flight_id in self.flights.ids_where(|f| f.route_id == id) {
            self.remove_flight(flight_id);
        }
        true
    }

    fn remove_airplane_type(&mut self, id: i64) -> bool {
        if self.airplane_types.rows.remove(&id).is_none() {
            return false;
        }
        for airplane_id in self.airplanes.ids_where(|a| a.airplane_type_id == id) {
            self.remove_airplane(airplane_id);
        }
        true
    }

    fn remove_airplane(&mut self, id: i64) -> bool {
        if self.airplanes.rows.remove(&id).is_none() {
            return false;
        }
        for flight_id in self.flights.ids_where(|f| f.airplane_id == id) {
            self.remove_flight(flight_id);
        }
        true
    }

    fn remove_flight(&mut self, id: i64) -> bool {
        if self.flights.rows.remove(&id).is_none() {
            return false;
        }
        self.tickets.rows.retain(|_, t| t.flight_id != id);
        true
    }

    fn remove_crew(&mut self, id: i64) -> bool {
        if self.crews.rows.remove(&id).is_none() {
            return false;
        }
        for flight in self.flights.rows.values_mut() {
            flight.crew_ids.retain(|crew_id| *crew_id != id);
        }
        true
    }

    fn remove_order(&mut self, id: i64) -> bool {
        if self.orders.rows.remove(&id).is_none() {
            return false;
        }
        self.tickets.rows.retain(|_, t| t.order_id != id);
        true
    }
}

/// Repository that keeps all data in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AirportRepository for MemoryRepository {
    async fn list_airports(&self) -> DbResult<Vec<Airport>> {
        Ok(self.store.read().await.airports.values().cloned().collect())
    }

    async fn get_airport(&self, id: i64) -> DbResult<Option<Airport>> {
        Ok(self.store.read().await.airports.get(id).cloned())
    }

    async fn insert_airport(&self, airport: NewAirport) -> DbResult<Airport> {
        let mut store = self.store.write().await;
        Ok(store.airports.insert_with(|id| Airport {
            id,
            name: airport.name,
            closest_big_city: airport.closest_big_city,
        }))
    }

    async fn update_airport(&self, id: i64, airport: NewAirport) -> DbResult<Airport> {
        let mut store = self.store.write().await;
        let row = store
            .airports
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Airport", id))?;
        row.name = airport.name;
        row.closest_big_city = airport.closest_big_city;
        Ok(row.clone())
    }

    async fn delete_airport(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_airport(id) {
            Ok(())
        } else {
            Err(DbError::not_found("Airport", id))
        }
    }
}

#[async_trait]
impl RouteRepository for MemoryRepository {
    async fn list_routes(&self) -> DbResult<Vec<RouteDetails>> {
        let store = self.store.read().await;
        store
            .routes
            .values()
            .map(|r| store.route_details(r))
            .collect()
    }

    async fn get_route(&self, id: i64) -> DbResult<Option<RouteDetails>> {
        let store = self.store.read().await;
        store
            .routes
            .get(id)
            .map(|r| store.route_details(r))
            .transpose()
    }

    async fn insert_route(&self, route: NewRoute) -> DbResult<Route> {
        let mut store = self.store.write().await;
        store.check_route_refs(&route)?;
        Ok(store.routes.insert_with(|id| Route {
            id,
            source_id: route.source_id,
            destination_id: route.destination_id,
            distance: route.distance,
        }))
    }

    async fn update_route(&self, id: i64, route: NewRoute) -> DbResult<Route> {
        let mut store = self.store.write().await;
        if !store.routes.contains(id) {
            return Err(DbError::not_found("Route", id));
        }
        store.check_route_refs(&route)?;
        let updated = Route {
            id,
            source_id: route.source_id,
            destination_id: route.destination_id,
            distance: route.distance,
        };
        store.routes.rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_route(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_route(id) {
            Ok(())
        } else {
            Err(DbError::not_found("Route", id))
        }
    }
}

#[async_trait]
impl CrewRepository for MemoryRepository {
    async fn list_crews(&self) -> DbResult<Vec<Crew>> {
        Ok(self.store.read().await.crews.values().cloned().collect())
    }

    async fn get_crew(&self, id: i64) -> DbResult<Option<Crew>> {
        Ok(self.store.read().await.crews.get(id).cloned())
    }

    async fn insert_crew(&self, crew: NewCrew) -> DbResult<Crew> {
        let mut store = self.store.write().await;
        Ok(store.crews.insert_with(|id| Crew {
            id,
            first_name: crew.first_name,
            last_name: crew.last_name,
        }))
    }

    async fn update_crew(&self, id: i64, crew: NewCrew) -> DbResult<Crew> {
        let mut store = self.store.write().await;
        let row = store
            .crews
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Crew", id))?;
        row.first_name = crew.first_name;
        row.last_name = crew.last_name;
        Ok(row.clone())
    }

    async fn delete_crew(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_crew(id) {
            Ok(())
        } else {
            Err(DbError::not_found("Crew", id))
        }
    }
}

#[async_trait]
impl AirplaneTypeRepository for MemoryRepository {
    async fn list_airplane_types(&self) -> DbResult<Vec<AirplaneType>> {
        Ok(self
            .store
            .read()
            .await
            .airplane_types
            .values()
            .cloned()
            .collect())
    }

    async fn get_airplane_type(&self, id: i64) -> DbResult<Option<AirplaneType>> {
        Ok(self.store.read().await.airplane_types.get(id).cloned())
    }

    async fn insert_airplane_type(
        &self,
        airplane_type: NewAirplaneType,
    ) -> DbResult<AirplaneType> {
        let mut store = self.store.write().await;
        Ok(store.airplane_types.insert_with(|id| AirplaneType {
            id,
            name: airplane_type.name,
        }))
    }

    async fn update_airplane_type(
        &self,
        id: i64,
        airplane_type: NewAirplaneType,
    ) -> DbResult<AirplaneType> {
        let mut store = self.store.write().await;
        let row = store
            .airplane_types
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("AirplaneType", id))?;
        row.name = airplane_type.name;
        Ok(row.clone())
    }

    async fn delete_airplane_type(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_airplane_type(id) {
            Ok(())
        } else {
            Err(DbError::not_found("AirplaneType", id))
        }
    }
}

#[async_trait]
impl AirplaneRepository for MemoryRepository {
    async fn list_airplanes(&self) -> DbResult<Vec<AirplaneDetails>> {
        let store = self.store.read().await;
        store
            .airplanes
            .values()
            .map(|a| store.airplane_details(a))
            .collect()
    }

    async fn get_airplane(&self, id: i64) -> DbResult<Option<AirplaneDetails>> {
        let store = self.store.read().await;
        store
            .airplanes
            .get(id)
            .map(|a| store.airplane_details(a))
            .transpose()
    }

    async fn insert_airplane(&self, airplane: NewAirplane) -> DbResult<Airplane> {
        let mut store = self.store.write().await;
        Store::require(
            &store.airplane_types,
            "AirplaneType",
            airplane.airplane_type_id,
        )?;
        Ok(store.airplanes.insert_with(|id| Airplane {
            id,
            name: airplane.name,
            rows: airplane.rows,
            seats_in_row: airplane.seats_in_row,
            airplane_type_id: airplane.airplane_type_id,
        }))
    }

    async fn update_airplane(&self, id: i64, airplane: NewAirplane) -> DbResult<Airplane> {
        let mut store = self.store.write().await;
        if !store.airplanes.contains(id) {
            return Err(DbError::not_found("Airplane", id));
        }
        Store::require(
            &store.airplane_types,
            "AirplaneType",
            airplane.airplane_type_id,
        )?;
        let updated = Airplane {
            id,
            name: airplane.name,
            rows: airplane.rows,
            seats_in_row: airplane.seats_in_row,
            airplane_type_id: airplane.airplane_type_id,
        };
        store.airplanes.rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_airplane(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_airplane(id) {
            Ok(())
        } else {
            Err(DbError::not_found("Airplane", id))
        }
    }
}

#[async_trait]
impl FlightRepository for MemoryRepository {
    async fn list_flights(&self, filter: &FlightFilter) -> DbResult<Vec<FlightDetails>> {
        let store = self.store.read().await;
        let mut flights = Vec::new();
        for flight in store.flights.values() {
            let details = store.flight_details(flight)?;
            if filter.matches(&details) {
                flights.push(details);
            }
        }
        Ok(flights)
    }

    async fn get_flight(&self, id: i64) -> DbResult<Option<FlightDetails>> {
        let store = self.store.read().await;
        store
            .flights
            .get(id)
            .map(|f| store.flight_details(f))
            .transpose()
    }

    async fn insert_flight(&self, flight: NewFlight) -> DbResult<Flight> {
        let mut store = self.store.write().await;
        store.check_flight_refs(&flight)?;
        Ok(store.flights.insert_with(|id| Flight {
            id,
            route_id: flight.route_id,
            airplane_id: flight.airplane_id,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            crew_ids: flight.crew_set(),
        }))
    }

    async fn update_flight(&self, id: i64, flight: NewFlight) -> DbResult<Flight> {
        let mut store = self.store.write().await;
        if !store.flights.contains(id) {
            return Err(DbError::not_found("Flight", id));
        }
        store.check_flight_refs(&flight)?;
        let updated = Flight {
            id,
            route_id: flight.route_id,
            airplane_id: flight.airplane_id,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            crew_ids: flight.crew_set(),
        };
        store.flights.rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_flight(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_flight(id) {
            Ok(())
        } else {
            Err(DbError::not_found("Flight", id))
        }
    }

    async fn airplanes_for_flights(&self, flight_ids: &[i64]) -> DbResult<HashMap<i64, Airplane>> {
        let store = self.store.read().await;
        let mut airplanes = HashMap::new();
        for id in flight_ids {
            if let Some(flight) = store.flights.get(*id) {
                if let Some(airplane) = store.airplanes.get(flight.airplane_id) {
                    airplanes.insert(*id, airplane.clone());
                }
            }
        }
        Ok(airplanes)
    }
}

#[async_trait]
impl OrderRepository for MemoryRepository {
    async fn list_orders(&self, customer: Option<&str>) -> DbResult<Vec<OrderWithTickets>> {
        let store = self.store.read().await;
        let orders: Vec<&Order> = store
            .orders
            .values()
            .filter(|o| customer.is_none() || o.customer.as_deref() == customer)
            .collect();
        Ok(orders
            .into_iter()
            .map(|o| store.order_with_tickets(o))
            .collect())
    }

    async fn get_order(&self, id: i64) -> DbResult<Option<OrderWithTickets>> {
        let store = self.store.read().await;
        Ok(store.orders.get(id).map(|o| store.order_with_tickets(o)))
    }

    async fn create_order(&self, order: NewOrder) -> DbResult<OrderWithTickets> {
        let mut store = self.store.write().await;

        let mut airplanes: HashMap<i64, Airplane> = HashMap::new();
        let mut taken: HashSet<(i64, i32, i32)> = HashSet::new();
        for request in &order.tickets {
            let flight = store
                .flights
                .get(request.flight_id)
                .ok_or(DbError::invalid_reference("Flight", request.flight_id))?;
            if let Some(airplane) = store.airplanes.get(flight.airplane_id) {
                airplanes.insert(request.flight_id, airplane.clone());
            }
            taken.extend(
                store
                    .tickets
                    .values()
                    .filter(|t| t.flight_id == request.flight_id)
                    .map(|t| (t.flight_id, t.row, t.seat)),
            );
        }

        // Reject before touching any table so a failed order leaves nothing behind
        check_placements(&order.tickets, &airplanes)?;
        for request in &order.tickets {
            if !taken.insert((request.flight_id, request.row, request.seat)) {
                return Err(DbError::SeatTaken(SeatConflict {
                    flight: request.flight_id,
                    row: request.row,
                    seat: request.seat,
                }));
            }
        }

        let created = store.orders.insert_with(|id| Order {
            id,
            created_at: Utc::now(),
            customer: order.customer,
        });
        for request in &order.tickets {
            store.tickets.insert_with(|id| Ticket {
                id,
                row: request.row,
                seat: request.seat,
                flight_id: request.flight_id,
                order_id: created.id,
            });
        }

        Ok(store.order_with_tickets(&created))
    }

    async fn delete_order(&self, id: i64) -> DbResult<()> {
        if self.store.write().await.remove_order(id) {
            Ok(())
        } else {
            Err(DbError::not_found("Order", id))
        }
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTicket;
    use chrono::{TimeZone, Utc};

    struct Fixture {
        repo: MemoryRepository,
        airport: Airport,
        route: Route,
        airplane: Airplane,
        crew: Crew,
        flight: Flight,
    }

    async fn fixture() -> Fixture {
        let repo = MemoryRepository::new();
        let airport = repo
            .insert_airport(NewAirport {
                name: "Boryspil".to_string(),
                closest_big_city: "Kyiv".to_string(),
            })
            .await
            .unwrap();
        let other = repo
            .insert_airport(NewAirport {
                name: "Lviv".to_string(),
                closest_big_city: "Lviv".to_string(),
            })
            .await
            .unwrap();
        let route = repo
            .insert_route(NewRoute {
                source_id: airport.id,
                destination_id: other.id,
                distance: 540,
            })
            .await
            .unwrap();
        let airplane_type = repo
            .insert_airplane_type(NewAirplaneType {
                name: "Boeing 737".to_string(),
            })
            .await
            .unwrap();
        let airplane = repo
            .insert_airplane(NewAirplane {
                name: "UR-BAA".to_string(),
                rows: 10,
                seats_in_row: 5,
                airplane_type_id: airplane_type.id,
            })
            .await
            .unwrap();
        let crew = repo
            .insert_crew(NewCrew {
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
            })
            .await
            .unwrap();
        let flight = repo
            .insert_flight(NewFlight {
                route_id: route.id,
                airplane_id: airplane.id,
                crew_ids: vec![crew.id, crew.id],
                departure_time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
                arrival_time: Utc.with_ymd_and_hms(2024, 5, 1, 11, 30, 0).unwrap(),
            })
            .await
            .unwrap();
        Fixture {
            repo,
            airport,
            route,
            airplane,
            crew,
            flight,
        }
    }

    fn ticket(flight_id: i64, row: i32, seat: i32) -> NewTicket {
        NewTicket {
            flight_id,
            row,
            seat,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let f = fixture().await;
        assert_eq!(f.airport.id, 1);
        assert_eq!(f.route.id, 1);
        assert_eq!(f.airplane.id, 1);
    }

    #[tokio::test]
    async fn test_flight_crew_is_deduplicated() {
        let f = fixture().await;
        assert_eq!(f.flight.crew_ids, vec![f.crew.id]);
    }

    #[tokio::test]
    async fn test_insert_route_with_missing_airport() {
        let f = fixture().await;
        let err = f
            .repo
            .insert_route(NewRoute {
                source_id: f.airport.id,
                destination_id: 99,
                distance: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidReference {
                entity: "Airport",
                id: 99
            }
        ));
    }

    #[tokio::test]
    async fn test_create_order_and_taken_places() {
        let f = fixture().await;
        let order = f
            .repo
            .create_order(NewOrder {
                customer: Some("42".to_string()),
                tickets: vec![ticket(f.flight.id, 2, 1), ticket(f.flight.id, 1, 3)],
            })
            .await
            .unwrap();
        assert_eq!(order.tickets.len(), 2);
        assert_eq!((order.tickets[0].row, order.tickets[0].seat), (1, 3));

        let details = f.repo.get_flight(f.flight.id).await.unwrap().unwrap();
        assert_eq!(
            details.taken_places,
            vec![SeatPosition { row: 1, seat: 3 }, SeatPosition { row: 2, seat: 1 }]
        );
    }

    #[tokio::test]
    async fn test_taken_seat_conflicts_and_persists_nothing() {
        let f = fixture().await;
        f.repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 1, 1)],
            })
            .await
            .unwrap();

        let err = f
            .repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 3, 3), ticket(f.flight.id, 1, 1)],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::SeatTaken(SeatConflict {
                row: 1,
                seat: 1,
                ..
            })
        ));

        assert_eq!(f.repo.list_orders(None).await.unwrap().len(), 1);
        let details = f.repo.get_flight(f.flight.id).await.unwrap().unwrap();
        assert_eq!(details.tickets_sold(), 1);
    }

    #[tokio::test]
    async fn test_same_seat_twice_in_one_order() {
        let f = fixture().await;
        let err = f
            .repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 4, 4), ticket(f.flight.id, 4, 4)],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::SeatTaken(_)));
        assert!(f.repo.list_orders(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_orders_for_same_seat() {
        let f = fixture().await;
        let flight_id = f.flight.id;
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = f.repo.clone();
                tokio::spawn(async move {
                    repo.create_order(NewOrder {
                        customer: None,
                        tickets: vec![ticket(flight_id, 5, 5)],
                    })
                    .await
                })
            })
            .collect();

        let mut succeeded = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(DbError::SeatTaken(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(succeeded, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_order_checked_against_current_airplane_grid() {
        let f = fixture().await;
        f.repo
            .update_airplane(
                f.airplane.id,
                NewAirplane {
                    name: f.airplane.name.clone(),
                    rows: 4,
                    seats_in_row: f.airplane.seats_in_row,
                    airplane_type_id: f.airplane.airplane_type_id,
                },
            )
            .await
            .unwrap();

        let err = f
            .repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 1, 1), ticket(f.flight.id, 9, 1)],
            })
            .await
            .unwrap_err();
        match err {
            DbError::Placement { index, error } => {
                assert_eq!(index, 1);
                assert_eq!(error.bound, (1, 4));
            },
            other => panic!("expected placement error, got {:?}", other),
        }
        assert!(f.repo.list_orders(None).await.unwrap().is_empty());
        let details = f.repo.get_flight(f.flight.id).await.unwrap().unwrap();
        assert!(details.taken_places.is_empty());
    }

    #[tokio::test]
    async fn test_order_for_unknown_flight() {
        let f = fixture().await;
        let err = f
            .repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(404, 1, 1)],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidReference {
                entity: "Flight",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_airport_cascades_to_tickets() {
        let f = fixture().await;
        f.repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 1, 1)],
            })
            .await
            .unwrap();

        f.repo.delete_airport(f.airport.id).await.unwrap();

        assert!(f.repo.get_route(f.route.id).await.unwrap().is_none());
        assert!(f.repo.get_flight(f.flight.id).await.unwrap().is_none());
        let orders = f.repo.list_orders(None).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders[0].tickets.is_empty());
    }

    #[tokio::test]
    async fn test_delete_crew_unlinks_from_flights() {
        let f = fixture().await;
        f.repo.delete_crew(f.crew.id).await.unwrap();
        let details = f.repo.get_flight(f.flight.id).await.unwrap().unwrap();
        assert!(details.flight.crew_ids.is_empty());
        assert!(details.crew.is_empty());
    }

    #[tokio::test]
    async fn test_delete_order_frees_seats() {
        let f = fixture().await;
        let order = f
            .repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 1, 1)],
            })
            .await
            .unwrap();
        f.repo.delete_order(order.order.id).await.unwrap();

        f.repo
            .create_order(NewOrder {
                customer: None,
                tickets: vec![ticket(f.flight.id, 1, 1)],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_orders_by_customer_in_id_order() {
        let f = fixture().await;
        for (customer, seat) in [("a", 1), ("b", 2), ("a", 3)] {
            f.repo
                .create_order(NewOrder {
                    customer: Some(customer.to_string()),
                    tickets: vec![ticket(f.flight.id, 1, seat)],
                })
                .await
                .unwrap();
        }

        let orders = f.repo.list_orders(Some("a")).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders[0].order.id < orders[1].order.id);
        assert_eq!(f.repo.list_orders(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_rows_on_update_and_delete() {
        let f = fixture().await;
        assert!(matches!(
            f.repo.delete_flight(99).await,
            Err(DbError::NotFound(_))
        ));
        assert!(matches!(
            f.repo
                .update_crew(
                    99,
                    NewCrew {
                        first_name: "A".to_string(),
                        last_name: "B".to_string()
                    }
                )
                .await,
            Err(DbError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_airplanes_for_flights_skips_unknown() {
        let f = fixture().await;
        let airplanes = f
            .repo
            .airplanes_for_flights(&[f.flight.id, 77])
            .await
            .unwrap();
        assert_eq!(airplanes.len(), 1);
        assert_eq!(airplanes[&f.flight.id], f.airplane);
    }
}
