//! Postgres repository tests against the real migrations
//!
//! Ignored by default; run with a reachable `DATABASE_URL`:
//! `cargo test -p airport-server --test postgres_repository_tests -- --ignored`

use chrono::{TimeZone, Utc};
use sqlx::PgPool;

use airport_server::db::{
    AirplaneRepository, AirplaneTypeRepository, AirportRepository, CrewRepository, DbError,
    FlightFilter, FlightRepository, OrderRepository, PgRepository, Repository, RouteRepository,
};
use airport_server::models::{
    Airplane, NewAirplane, NewAirplaneType, NewAirport, NewCrew, NewFlight, NewOrder, NewRoute, NewTicket,
};

struct Seeded {
    flight: i64,
    crew: i64,
    airplane: Airplane,
}

async fn seed(repo: &PgRepository, airplane_name: &str) -> Seeded {
    let source = repo
        .insert_airport(NewAirport {
            name: "Boryspil".to_string(),
            closest_big_city: "Kyiv".to_string(),
        })
        .await
        .unwrap();
    let destination = repo
        .insert_airport(NewAirport {
            name: "Danylo Halytskyi".to_string(),
            closest_big_city: "Lviv".to_string(),
        })
        .await
        .unwrap();
    let route = repo
        .insert_route(NewRoute {
            source_id: source.id,
            destination_id: destination.id,
            distance: 470,
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
            name: airplane_name.to_string(),
            rows: 10,
            seats_in_row: 5,
            airplane_type_id: airplane_type.id,
        })
        .await
        .unwrap();
    let crew = repo
        .insert_crew(NewCrew {
            first_name: "Olena".to_string(),
            last_name: "Kovalenko".to_string(),
        })
        .await
        .unwrap();
    let flight = repo
        .insert_flight(NewFlight {
            route_id: route.id,
            airplane_id: airplane.id,
            crew_ids: vec![crew.id, crew.id],
            departure_time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        })
        .await
        .unwrap();

    Seeded {
        flight: flight.id,
        crew: crew.id,
        airplane,
    }
}

fn ticket(flight_id: i64, row: i32, seat: i32) -> NewTicket {
    NewTicket {
        flight_id,
        row,
        seat,
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_ping(pool: PgPool) {
    let repo = PgRepository::new(pool);
    repo.ping().await.unwrap();
    assert_eq!(repo.backend(), "postgres");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_flight_details_loaded(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let seeded = seed(&repo, "UR-BAA").await;

    let flight = repo.get_flight(seeded.flight).await.unwrap().unwrap();
    assert_eq!(flight.flight.crew_ids, vec![seeded.crew]);
    assert_eq!(flight.crew.len(), 1);
    assert_eq!(flight.route.source.name, "Boryspil");
    assert_eq!(flight.airplane.airplane_type.name, "Boeing 737");
    assert!(flight.taken_places.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_order_is_atomic(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let seeded = seed(&repo, "UR-BAA").await;

    let order = repo
        .create_order(NewOrder {
            customer: Some("alice".to_string()),
            tickets: vec![ticket(seeded.flight, 2, 1), ticket(seeded.flight, 1, 3)],
        })
        .await
        .unwrap();
    assert_eq!(order.tickets.len(), 2);
    assert_eq!(order.order.customer.as_deref(), Some("alice"));

    let result = repo
        .create_order(NewOrder {
            customer: None,
            tickets: vec![ticket(seeded.flight, 4, 4), ticket(seeded.flight, 2, 1)],
        })
        .await;
    match result {
        Err(DbError::SeatTaken(conflict)) => {
            assert_eq!((conflict.row, conflict.seat), (2, 1));
        },
        other => panic!("expected seat conflict, got {:?}", other),
    }

    let flight = repo.get_flight(seeded.flight).await.unwrap().unwrap();
    assert_eq!(flight.tickets_sold(), 2);
    assert_eq!(repo.list_orders(None).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_order_checked_against_current_airplane_grid(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let seeded = seed(&repo, "UR-BAA").await;

    repo.update_airplane(
        seeded.airplane.id,
        NewAirplane {
            name: seeded.airplane.name.clone(),
            rows: 4,
            seats_in_row: seeded.airplane.seats_in_row,
            airplane_type_id: seeded.airplane.airplane_type_id,
        },
    )
    .await
    .unwrap();

    let result = repo
        .create_order(NewOrder {
            customer: None,
            tickets: vec![ticket(seeded.flight, 1, 1), ticket(seeded.flight, 9, 1)],
        })
        .await;
    match result {
        Err(DbError::Placement { index, error }) => {
            assert_eq!(index, 1);
            assert_eq!(error.bound, (1, 4));
        },
        other => panic!("expected placement error, got {:?}", other),
    }
    assert!(repo.list_orders(None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_unknown_flight_in_order(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let result = repo
        .create_order(NewOrder {
            customer: None,
            tickets: vec![ticket(9999, 1, 1)],
        })
        .await;
    assert!(matches!(
        result,
        Err(DbError::InvalidReference { entity: "Flight", id: 9999 })
    ));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_flight_filters(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let baa = seed(&repo, "UR-BAA").await;
    seed(&repo, "UR-PSX").await;

    let by_name = repo
        .list_flights(&FlightFilter {
            airplane_name: Some("ur-baa".to_string()),
            ..FlightFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].flight.id, baa.flight);

    let by_crew = repo
        .list_flights(&FlightFilter {
            crew_ids: Some(vec![baa.crew, baa.crew]),
            ..FlightFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_crew.len(), 1);

    let wildcard = repo
        .list_flights(&FlightFilter {
            airplane_name: Some("%".to_string()),
            ..FlightFilter::default()
        })
        .await
        .unwrap();
    assert!(wildcard.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_delete_flight_cascades_to_tickets(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let seeded = seed(&repo, "UR-BAA").await;

    let order = repo
        .create_order(NewOrder {
            customer: None,
            tickets: vec![ticket(seeded.flight, 1, 1)],
        })
        .await
        .unwrap();

    repo.delete_flight(seeded.flight).await.unwrap();
    let order = repo.get_order(order.order.id).await.unwrap().unwrap();
    assert!(order.tickets.is_empty());

    assert!(matches!(
        repo.delete_flight(seeded.flight).await,
        Err(DbError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires DATABASE_URL
async fn test_airplane_grid_check(pool: PgPool) {
    let repo = PgRepository::new(pool);
    let airplane_type = repo
        .insert_airplane_type(NewAirplaneType {
            name: "Antonov".to_string(),
        })
        .await
        .unwrap();

    let result = repo
        .insert_airplane(NewAirplane {
            name: "UR-ANT".to_string(),
            rows: 0,
            seats_in_row: 4,
            airplane_type_id: airplane_type.id,
        })
        .await;
    assert!(matches!(result, Err(DbError::Constraint(_))));
}
