#[cfg(test)]
mod tests {
    use crate::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tether_core::{Component, Model, Store};

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestStore {
        title: String,
        count: i64,
    }
    impl Model for TestStore {}

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Settings {
        dark: bool,
    }
    impl Model for Settings {}

    fn store(title: &str) -> Store<TestStore> {
        Store::new(TestStore {
            title: title.to_string(),
            count: 0,
        })
    }

    #[test]
    fn test_retrieve_store_is_stable() {
        reset_stores();
        for id in [
            Identifier::None,
            Identifier::from("a"),
            Identifier::from(42i64),
            Identifier::object(&Rc::new(())),
            Identifier::model::<TestStore>(),
        ] {
            let first = retrieve_store::<TestStore>(id.clone()).unwrap();
            let second = retrieve_store::<TestStore>(id).unwrap();
            assert!(ContextFactory::ptr_eq(&first, &second));
        }
        assert_eq!(StoreRegistry::global().len(), 5);
    }

    #[test]
    fn test_distinct_identifiers_do_not_mix() {
        let a = retrieve_store::<TestStore>("a").unwrap();
        let b = retrieve_store::<TestStore>("b").unwrap();
        assert!(!ContextFactory::ptr_eq(&a, &b));

        a.provider().provide(store("X"), || {
            assert_eq!(a.read().map(|s| s.get().title), Some("X".into()));
            assert!(b.read().is_none());
        });
    }

    #[test]
    fn test_read_without_publish_is_none() {
        let c = Component::new("Reader");
        let read = c.render(use_store::<TestStore>).unwrap();
        assert!(read.is_none());
        assert_eq!(c.render(|| use_store_map::<TestStore, _>(|s| s.count)).unwrap(), None);
    }

    #[test]
    fn test_nested_publish() {
        let ctx = retrieve_store::<TestStore>("a").unwrap();
        let outer = ctx.provider();
        let deeper = retrieve_store::<TestStore>("a").unwrap().provider();

        let title = || use_store_map_with_id::<TestStore, _>("a", |s| s.title.clone()).unwrap();

        outer.provide(store("X"), || {
            assert_eq!(title().as_deref(), Some("X"));
            deeper.provide(store("Y"), || {
                assert_eq!(title().as_deref(), Some("Y"));
            });
            assert_eq!(title().as_deref(), Some("X"));
        });
        assert_eq!(title(), None);
    }

    #[test]
    fn test_return_the_same_store_for_the_same_model() {
        let wrapper = Component::new("Wrapper");
        let first = Component::new("First");
        let second = Component::new("Second");

        let (created, a, b) = wrapper.render(|| {
            let provider = use_provider::<TestStore>().unwrap();
            let created = use_create_store::<TestStore>().unwrap();
            let (a, b) = provider.provide(created.clone(), || {
                let a = first.render(use_store::<TestStore>).unwrap();
                let b = second.render(use_store::<TestStore>).unwrap();
                (a, b)
            });
            (created, a, b)
        });

        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Store::ptr_eq(&a, &b));
        assert!(Store::ptr_eq(&a, &created));
    }

    #[test]
    fn test_return_a_different_store_for_a_different_identifier() {
        let outer = Component::new("Outer");
        let inner = Component::new("Inner");
        let check = Component::new("CheckStores");

        let publish = |c: &Component, id: &'static str, body: &dyn Fn()| {
            c.render(|| {
                let provider = use_provider_with_id::<TestStore>(id).unwrap();
                let created = use_create_store_from::<TestStore>(json!({ "title": id })).unwrap();
                provider.provide(created, body)
            })
        };

        publish(&outer, "my-store", &|| {
            publish(&inner, "my-other-store", &|| {
                check.render(|| {
                    let first = use_store_with_id::<TestStore>("my-store").unwrap().unwrap();
                    let second = use_store_with_id::<TestStore>("my-other-store")
                        .unwrap()
                        .unwrap();
                    assert!(!Store::ptr_eq(&first, &second));
                    assert_eq!(first.read(|s| s.title.clone()), "my-store");
                    assert_eq!(second.read(|s| s.title.clone()), "my-other-store");
                    // the model-typed default store was never published here
                    assert!(use_store::<TestStore>().unwrap().is_none());
                })
            })
        });
    }

    #[test]
    fn test_create_store_once_per_component_instance() {
        let c = Component::new("Creator");

        #[derive(Default, Serialize, Deserialize)]
        struct Tracked {
            n: u8,
        }
        impl Model for Tracked {
            fn create(_: &serde_json::Value) -> Result<Self, tether_core::ModelError> {
                CREATIONS.with(|c| c.set(c.get() + 1));
                Ok(Tracked::default())
            }
        }
        thread_local! {
            static CREATIONS: Cell<u32> = const { Cell::new(0) };
        }

        let first = c.render(use_create_store::<Tracked>).unwrap();
        for _ in 0..3 {
            let again = c
                .render(|| use_create_store_from::<Tracked>(json!({ "n": 9 })))
                .unwrap();
            assert!(Store::ptr_eq(&first, &again));
        }
        assert_eq!(CREATIONS.with(Cell::get), 1);

        // a second instance of the same component gets its own store
        let other = Component::new("Creator")
            .render(use_create_store::<Tracked>)
            .unwrap();
        assert!(!Store::ptr_eq(&first, &other));

        c.dispose();
        let fresh = c.render(use_create_store::<Tracked>).unwrap();
        assert!(!Store::ptr_eq(&first, &fresh));
        assert_eq!(CREATIONS.with(Cell::get), 3);
    }

    #[test]
    fn test_create_store_error_is_memoized() {
        let c = Component::new("Broken");
        let err = c
            .render(|| use_create_store_from::<TestStore>(json!({ "count": "many" })))
            .unwrap_err();
        assert!(matches!(err, StoreError::Model(_)));
        // the first snapshot wins, later ones are ignored
        assert!(c
            .render(|| use_create_store_from::<TestStore>(json!({ "count": 1 })))
            .is_err());
    }

    #[test]
    fn test_hooks_report_model_mismatch() {
        use_provider_with_id::<TestStore>("shared").unwrap();
        let err = use_store_with_id::<Settings>("shared").unwrap_err();
        assert!(matches!(err, StoreError::ModelMismatch { .. }));
        insta::assert_snapshot!(
            err.to_string().replace("tether_store::tests::tests::", ""),
            @r#"identifier "shared" is registered for model `TestStore`, not `Settings`"#
        );
    }

    #[test]
    fn test_model_types_have_separate_default_stores() {
        let tp = use_provider::<TestStore>().unwrap();
        let sp = use_provider::<Settings>().unwrap();
        tp.provide(store("T"), || {
            assert!(use_store::<Settings>().unwrap().is_none());
            sp.provide(Store::new(Settings { dark: true }), || {
                assert_eq!(use_store_map::<Settings, _>(|s| s.dark).unwrap(), Some(true));
                assert_eq!(
                    use_store_map::<TestStore, _>(|s| s.title.clone()).unwrap().as_deref(),
                    Some("T")
                );
            });
        });
    }

    #[test]
    fn test_explicit_none_identifier_is_not_the_model_default() {
        let none = use_provider_with_id::<TestStore>(Identifier::None).unwrap();
        none.provide(store("anon"), || {
            assert!(use_store::<TestStore>().unwrap().is_none());
            assert!(use_store_with_id::<TestStore>(Identifier::None).unwrap().is_some());
        });
    }

    #[test]
    fn test_object_identifiers() {
        let owner = Rc::new(String::from("panel"));
        let twin = Rc::new(String::from("panel"));
        let p = use_provider_with_id::<TestStore>(Identifier::object(&owner)).unwrap();
        p.provide(store("owned"), || {
            assert!(use_store_with_id::<TestStore>(Identifier::object(&owner)).unwrap().is_some());
            assert!(use_store_with_id::<TestStore>(Identifier::object(&twin)).unwrap().is_none());
        });
    }

    #[test]
    fn test_subscription_lives_with_component() {
        let c = Component::new("Watcher");
        let s = store("w");
        let seen = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..2 {
            c.render(|| {
                let seen = seen.clone();
                use_subscription(&s, move |m| seen.borrow_mut().push(m.count));
            });
        }
        assert_eq!(s.subscriber_count(), 1);

        s.update(|m| m.count = 1);
        c.dispose();
        s.update(|m| m.count = 2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(s.subscriber_count(), 0);
    }

    #[test]
    fn test_injected_registry_isolates_hooks() {
        let isolated = StoreRegistry::new();
        let outside = use_provider::<TestStore>().unwrap();
        outside.provide(store("global"), || {
            with_registry(isolated.clone(), || {
                assert!(use_store::<TestStore>().unwrap().is_none());
            });
        });
        assert_eq!(isolated.len(), 1);
    }

    #[test]
    fn test_subscriber_can_mount_a_subscribing_child() {
        let source = store("source");
        let watched = store("watched");
        let child = Component::new("Child");
        let seen = Rc::new(Cell::new(0));

        source.subscribe({
            let child = child.clone();
            let watched = watched.clone();
            let seen = seen.clone();
            move |_| {
                child.render(|| {
                    let seen = seen.clone();
                    use_subscription(&watched, move |m| seen.set(m.count));
                })
            }
        });
        // the child also watches the store whose change triggered it
        let self_watch = Component::new("SelfWatch");
        source.subscribe({
            let source = source.clone();
            move |_| self_watch.render(|| use_subscription(&source, |_| {}))
        });

        source.update(|m| m.count = 1);
        source.update(|m| m.count = 2);
        assert_eq!(watched.subscriber_count(), 1);
        assert_eq!(source.subscriber_count(), 3);

        watched.update(|m| m.count = 7);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn test_subscriber_can_dispose_a_subscribed_component() {
        let s = store("s");
        let c = Component::new("Watcher");
        let calls = Rc::new(Cell::new(0));

        c.render(|| {
            let calls = calls.clone();
            use_subscription(&s, move |_| calls.set(calls.get() + 1));
        });
        s.subscribe({
            let c = c.clone();
            move |_| c.dispose()
        });
        assert_eq!(s.subscriber_count(), 2);

        s.update(|m| m.count = 1);
        s.update(|m| m.count = 2);
        assert_eq!(s.subscriber_count(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_subscription_outside_render_is_ignored() {
        let s = store("loose");
        use_subscription(&s, |_| {});
        use_subscription(&s, |_| {});
        assert_eq!(s.subscriber_count(), 0);
    }
}
