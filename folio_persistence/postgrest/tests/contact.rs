use folio_demo::{JANE, MAX};
use folio_persistence_contracts::{ContactRepoCreateError, ContactRepository};
use folio_persistence_postgrest::{PostgrestContactRepository, PostgrestContactRepositoryConfig};
use folio_testing::postgrest::{serve, ContactRow, PostgrestState};
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use url::Url;

const API_KEY: &str = "test-api-key";
const TABLE: &str = "Contacts";

#[tokio::test]
async fn create() {
    let (state, base_url) = setup().await;
    let sut = make_sut(&base_url, TABLE, API_KEY);

    sut.create(&JANE).await.unwrap();
    sut.create(&MAX).await.unwrap();

    assert_eq!(
        state.rows().await,
        [
            ContactRow {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                message: "Hello there".into(),
            },
            ContactRow {
                name: (*MAX.name).clone(),
                email: (*MAX.email).clone(),
                message: (*MAX.message).clone(),
            },
        ]
    );
}

#[tokio::test]
async fn invalid_api_key() {
    let (state, base_url) = setup().await;
    let sut = make_sut(&base_url, TABLE, "wrong-key");

    let result = sut.create(&JANE).await;

    assert_matches!(result, Err(ContactRepoCreateError::Rejected(message)) if message == "Invalid API key");
    assert!(state.rows().await.is_empty());
}

#[tokio::test]
async fn unknown_table() {
    let (state, base_url) = setup().await;
    let sut = make_sut(&base_url, "Messages", API_KEY);

    let result = sut.create(&JANE).await;

    assert_matches!(
        result,
        Err(ContactRepoCreateError::Rejected(message))
            if message == "relation \"public.Messages\" does not exist"
    );
    assert!(state.rows().await.is_empty());
}

#[tokio::test]
async fn unreachable() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap())
        .parse()
        .unwrap();
    drop(listener);
    let sut = make_sut(&base_url, TABLE, API_KEY);

    let result = sut.create(&JANE).await;

    assert_matches!(result, Err(ContactRepoCreateError::Other(_)));
}

async fn setup() -> (PostgrestState, Url) {
    let state = PostgrestState::new(API_KEY, TABLE);
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap())
        .parse()
        .unwrap();
    tokio::spawn(serve(listener, state.clone()));
    (state, base_url)
}

fn make_sut(base_url: &Url, table: &str, api_key: &str) -> PostgrestContactRepository {
    PostgrestContactRepository::new(
        PostgrestContactRepositoryConfig::new(base_url, table, api_key.into()).unwrap(),
    )
    .unwrap()
}
