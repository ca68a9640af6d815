//! Behaviour shared by every store implementation, run against each of them
//! from their own test modules.

use chrono::NaiveDate;
use entities::{Film, FriendshipStatus, Genre, Mpa, User};

use crate::Store;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn film(name: &str) -> Film {
    Film::new(name, format!("About {name}"), date(2001, 9, 1), 100)
        .with_mpa(Mpa::new(3, "PG-13", ""))
}

pub(crate) fn user(login: &str) -> User {
    User::new(format!("{login}@example.com"), login, date(1990, 1, 1)).with_name(login)
}

pub(crate) async fn film_crud<S: Store>(store: &S) {
    let first = store.create_film(film("First")).await.unwrap();
    let second = store
        .create_film(film("Second").with_genres([Genre::new(2, "Drama"), Genre::new(1, "Comedy")]))
        .await
        .unwrap();
    assert!(first.id > 0);
    assert!(second.id > first.id);

    let fetched = store.get_film(second.id).await.unwrap().unwrap();
    assert_eq!(fetched.name.as_deref(), Some("Second"));
    assert_eq!(fetched.release_date, Some(date(2001, 9, 1)));
    assert_eq!(fetched.mpa.as_ref().map(|m| m.name.as_str()), Some("PG-13"));
    let genre_ids: Vec<_> = fetched.genres.iter().map(|g| g.id).collect();
    assert_eq!(genre_ids, vec![1, 2]);

    let mut changed = fetched.clone();
    changed.name = Some("Second, revised".to_string());
    changed.genres = vec![Genre::new(6, "Action")];
    changed.mpa = Some(Mpa::new(4, "R", ""));
    store.update_film(changed).await.unwrap();

    let fetched = store.get_film(second.id).await.unwrap().unwrap();
    assert_eq!(fetched.name.as_deref(), Some("Second, revised"));
    assert_eq!(fetched.genres, vec![Genre::new(6, "Action")]);
    assert_eq!(fetched.mpa.map(|m| m.id), Some(4));

    let all = store.list_films().await.unwrap();
    let ids: Vec<_> = all.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    assert!(store.contains_film(first.id).await.unwrap());
    assert!(!store.contains_film(9999).await.unwrap());
    assert!(store.get_film(9999).await.unwrap().is_none());

    let mut ghost = film("Ghost");
    ghost.id = 9999;
    assert!(store.update_film(ghost).await.is_err());
}

pub(crate) async fn user_crud<S: Store>(store: &S) {
    let alice = store.create_user(user("alice")).await.unwrap();
    let bob = store.create_user(user("bob")).await.unwrap();
    assert!(bob.id > alice.id);

    let mut changed = alice.clone();
    changed.email = Some("alice@films.org".to_string());
    store.update_user(changed).await.unwrap();

    let fetched = store.get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(fetched.email.as_deref(), Some("alice@films.org"));
    assert_eq!(fetched.birthday, Some(date(1990, 1, 1)));

    let ids: Vec<_> = store
        .list_users()
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![alice.id, bob.id]);

    assert!(store.contains_user(bob.id).await.unwrap());
    assert!(!store.contains_user(9999).await.unwrap());

    let mut ghost = user("ghost");
    ghost.id = 9999;
    assert!(store.update_user(ghost).await.is_err());
}

pub(crate) async fn likes_are_idempotent<S: Store>(store: &S) {
    let matrix = store.create_film(film("Matrix")).await.unwrap();
    let alice = store.create_user(user("alice")).await.unwrap();

    store.add_like(alice.id, matrix.id).await.unwrap();
    store.add_like(alice.id, matrix.id).await.unwrap();
    assert_eq!(store.like_count(matrix.id).await.unwrap(), 1);

    let fetched = store.get_film(matrix.id).await.unwrap().unwrap();
    assert_eq!(fetched.likes.into_iter().collect::<Vec<_>>(), vec![alice.id]);

    store.remove_like(alice.id, matrix.id).await.unwrap();
    store.remove_like(alice.id, matrix.id).await.unwrap();
    assert_eq!(store.like_count(matrix.id).await.unwrap(), 0);
}

pub(crate) async fn top_films_order<S: Store>(store: &S) {
    let a = store.create_film(film("A")).await.unwrap();
    let b = store.create_film(film("B")).await.unwrap();
    let c = store.create_film(film("C")).await.unwrap();
    let u1 = store.create_user(user("u1")).await.unwrap();
    let u2 = store.create_user(user("u2")).await.unwrap();

    store.add_like(u1.id, c.id).await.unwrap();
    store.add_like(u2.id, c.id).await.unwrap();
    store.add_like(u1.id, b.id).await.unwrap();

    let top: Vec<_> = store
        .top_films(10)
        .await
        .unwrap()
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![c.id, b.id, a.id]);

    let top = store.top_films(1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, c.id);
    assert_eq!(top[0].like_count(), 2);

    // Ties keep id order.
    store.add_like(u2.id, a.id).await.unwrap();
    let top: Vec<_> = store
        .top_films(3)
        .await
        .unwrap()
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(top, vec![c.id, a.id, b.id]);
}

pub(crate) async fn friendship_lifecycle<S: Store>(store: &S) {
    let alice = store.create_user(user("alice")).await.unwrap();
    let bob = store.create_user(user("bob")).await.unwrap();

    let status = store.add_friend(alice.id, bob.id).await.unwrap();
    assert_eq!(status, FriendshipStatus::Pending);

    // Both sides see each other while the request is pending.
    let alice_friends: Vec<_> = store
        .list_friends(alice.id)
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    let bob_friends: Vec<_> = store
        .list_friends(bob.id)
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(alice_friends, vec![bob.id]);
    assert_eq!(bob_friends, vec![alice.id]);

    // Re-adding changes nothing.
    let status = store.add_friend(alice.id, bob.id).await.unwrap();
    assert_eq!(status, FriendshipStatus::Pending);

    let status = store.add_friend(bob.id, alice.id).await.unwrap();
    assert_eq!(status, FriendshipStatus::Confirmed);
    let edge = store.get_friendship(alice.id, bob.id).await.unwrap().unwrap();
    assert!(edge.is_confirmed());

    let fetched = store.get_user(alice.id).await.unwrap().unwrap();
    assert!(fetched.friends.contains(&bob.id));

    // Removing ends the friendship for both sides.
    store.remove_friend(bob.id, alice.id).await.unwrap();
    assert!(store.get_friendship(bob.id, alice.id).await.unwrap().is_none());
    assert!(store.get_friendship(alice.id, bob.id).await.unwrap().is_none());
    assert!(store.list_friends(alice.id).await.unwrap().is_empty());
    assert!(store.list_friends(bob.id).await.unwrap().is_empty());

    // The receiving side of a pending request can remove it too.
    store.add_friend(bob.id, alice.id).await.unwrap();
    assert_eq!(store.list_friends(alice.id).await.unwrap().len(), 1);
    store.remove_friend(alice.id, bob.id).await.unwrap();
    assert!(store.get_friendship(bob.id, alice.id).await.unwrap().is_none());
    assert!(store.list_friends(alice.id).await.unwrap().is_empty());
    assert!(store.list_friends(bob.id).await.unwrap().is_empty());
    let fetched = store.get_user(alice.id).await.unwrap().unwrap();
    assert!(fetched.friends.is_empty());

    store.remove_friend(alice.id, bob.id).await.unwrap();
    assert!(store.list_friends(alice.id).await.unwrap().is_empty());
}

pub(crate) async fn deletes_cascade<S: Store>(store: &S) {
    let matrix = store.create_film(film("Matrix")).await.unwrap();
    let alice = store.create_user(user("alice")).await.unwrap();
    let bob = store.create_user(user("bob")).await.unwrap();

    store.add_like(alice.id, matrix.id).await.unwrap();
    store.add_like(bob.id, matrix.id).await.unwrap();
    store.add_friend(alice.id, bob.id).await.unwrap();
    store.add_friend(bob.id, alice.id).await.unwrap();

    store.delete_user(alice.id).await.unwrap();
    assert!(!store.contains_user(alice.id).await.unwrap());
    assert_eq!(store.like_count(matrix.id).await.unwrap(), 1);
    assert!(store.list_friends(bob.id).await.unwrap().is_empty());
    assert!(store.get_friendship(bob.id, alice.id).await.unwrap().is_none());
    assert!(store.delete_user(alice.id).await.is_err());

    store.delete_film(matrix.id).await.unwrap();
    assert!(store.get_film(matrix.id).await.unwrap().is_none());
    assert_eq!(store.like_count(matrix.id).await.unwrap(), 0);
    assert!(store.delete_film(matrix.id).await.is_err());

    // Ids are not reused after deletion.
    let next = store.create_film(film("Reloaded")).await.unwrap();
    assert!(next.id > matrix.id);
}

pub(crate) async fn catalog_is_seeded<S: Store>(store: &S) {
    let ratings = store.list_mpa().await.unwrap();
    let names: Vec<_> = ratings.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["G", "PG", "PG-13", "R", "NC-17"]);
    assert_eq!(store.get_mpa(3).await.unwrap().unwrap().name, "PG-13");
    assert!(store.get_mpa(42).await.unwrap().is_none());

    let genres = store.list_genres().await.unwrap();
    assert_eq!(genres.len(), 6);
    assert_eq!(store.get_genre(2).await.unwrap(), Some(Genre::new(2, "Drama")));
    assert!(store.get_genre(0).await.unwrap().is_none());
}
