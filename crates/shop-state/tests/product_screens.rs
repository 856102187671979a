//! Product list, detail and modal screens.

mod common;

use common::{product, setup, FakeShop, Op};
use shop_commerce::{ProductId, Quantity};
use shop_state::{quick_add, Load, ProductDetail, ProductList, ProductModal, ShopError};

#[tokio::test]
async fn test_list_mount_fetches_products() {
    let (shop, notifier, _store) = setup();
    let list = ProductList::new();
    assert!(list.is_empty());

    assert_eq!(list.mount(&*shop, &*notifier).await, Load::Applied);

    assert_eq!(list.len(), 3);
    assert_eq!(list.find(&ProductId::new("2")).map(|p| p.title), Some("Black tea".into()));
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_list_failure_keeps_previous_products() {
    let (shop, notifier, _store) = setup();
    let list = ProductList::new();
    list.mount(&*shop, &*notifier).await;

    shop.fail(Op::ListProducts);
    assert_eq!(list.mount(&*shop, &*notifier).await, Load::Failed);

    assert_eq!(list.len(), 3);
    assert_eq!(notifier.error_count(), 1);
    assert_eq!(notifier.notices()[0].message, "Failed to load products");
}

#[tokio::test]
async fn test_quick_add_puts_one_unit_in_cart() {
    let (_shop, _notifier, store) = setup();
    quick_add(&store, &ProductId::new("1")).await.unwrap();
    quick_add(&store, &ProductId::new("1")).await.unwrap();

    let rows = store.snapshot().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qty.get(), 2);
}

#[tokio::test]
async fn test_detail_adds_selected_quantity() {
    let (shop, notifier, store) = setup();
    let detail = ProductDetail::new();

    let load = detail
        .mount(&*shop, &*notifier, &ProductId::new("3"))
        .await;
    assert_eq!(load, Load::Applied);
    assert_eq!(detail.product().map(|p| p.title), Some("Oolong".into()));

    detail.select_quantity(4).unwrap();
    detail.add_to_cart(&store).await.unwrap();

    let rows = store.snapshot().rows();
    assert_eq!(rows[0].qty.get(), 4);
    assert_eq!(rows[0].total.value(), shop.price_of("3") * 4.0);
}

#[tokio::test]
async fn test_detail_remount_resets_selector() {
    let (shop, notifier, _store) = setup();
    let detail = ProductDetail::new();
    detail.mount(&*shop, &*notifier, &ProductId::new("1")).await;
    detail.select_quantity(7).unwrap();

    detail.mount(&*shop, &*notifier, &ProductId::new("2")).await;
    assert_eq!(detail.quantity(), Quantity::ONE);
}

#[tokio::test]
async fn test_detail_missing_product() {
    let (shop, notifier, store) = setup();
    let detail = ProductDetail::new();

    let load = detail
        .mount(&*shop, &*notifier, &ProductId::new("404"))
        .await;

    assert_eq!(load, Load::NotFound);
    assert!(detail.product().is_none());
    assert_eq!(notifier.error_count(), 1);
    assert_eq!(detail.add_to_cart(&store).await, Err(ShopError::NoProduct));
}

#[tokio::test]
async fn test_later_detail_mount_supersedes_earlier() {
    let shop = FakeShop::new();
    let notifier = shop_state::RecordingNotifier::new();
    let detail = ProductDetail::new();

    shop.hold_fetches();
    let first_id = ProductId::new("1");
    let mut first = Box::pin(detail.mount(&shop, &notifier, &first_id));
    assert!(futures::poll!(&mut first).is_pending());
    let second_id = ProductId::new("2");
    let mut second = Box::pin(detail.mount(&shop, &notifier, &second_id));
    assert!(futures::poll!(&mut second).is_pending());

    shop.release(1);
    assert_eq!(second.await, Load::Applied);
    shop.release(0);
    assert_eq!(first.await, Load::Stale);

    assert_eq!(detail.product().map(|p| p.id), Some(ProductId::new("2")));
}

#[tokio::test]
async fn test_failed_detail_mount_drops_other_product() {
    let (shop, notifier, store) = setup();
    let detail = ProductDetail::new();
    assert_eq!(detail.mount(&*shop, &*notifier, &ProductId::new("1")).await, Load::Applied);

    shop.fail(Op::GetProduct);
    assert_eq!(detail.mount(&*shop, &*notifier, &ProductId::new("2")).await, Load::Failed);
    assert_eq!(detail.product(), None);

    shop.recover(Op::GetProduct);
    shop.clear_calls();
    assert_eq!(detail.add_to_cart(&store).await, Err(ShopError::NoProduct));
    assert!(shop.calls().is_empty());
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_failed_remount_keeps_same_product() {
    let (shop, notifier, _store) = setup();
    let detail = ProductDetail::new();
    detail.mount(&*shop, &*notifier, &ProductId::new("1")).await;

    shop.fail(Op::GetProduct);
    assert_eq!(detail.mount(&*shop, &*notifier, &ProductId::new("1")).await, Load::Failed);
    assert_eq!(detail.product().map(|p| p.id), Some(ProductId::new("1")));
}

#[tokio::test]
async fn test_earlier_detail_landing_first_is_dropped_when_later_fails() {
    let shop = FakeShop::new();
    let notifier = shop_state::RecordingNotifier::new();
    let detail = ProductDetail::new();

    shop.hold_fetches();
    let first_id = ProductId::new("1");
    let mut first = Box::pin(detail.mount(&shop, &notifier, &first_id));
    assert!(futures::poll!(&mut first).is_pending());
    shop.fail(Op::GetProduct);
    let second_id = ProductId::new("2");
    let mut second = Box::pin(detail.mount(&shop, &notifier, &second_id));
    assert!(futures::poll!(&mut second).is_pending());

    shop.release(0);
    assert_eq!(first.await, Load::Applied);
    shop.release(1);
    assert_eq!(second.await, Load::Failed);

    assert_eq!(detail.product(), None);
}

#[tokio::test]
async fn test_earlier_detail_landing_after_later_failure_is_stale() {
    let shop = FakeShop::new();
    let notifier = shop_state::RecordingNotifier::new();
    let detail = ProductDetail::new();

    shop.hold_fetches();
    let first_id = ProductId::new("1");
    let mut first = Box::pin(detail.mount(&shop, &notifier, &first_id));
    assert!(futures::poll!(&mut first).is_pending());
    shop.fail(Op::GetProduct);
    let second_id = ProductId::new("2");
    let mut second = Box::pin(detail.mount(&shop, &notifier, &second_id));
    assert!(futures::poll!(&mut second).is_pending());

    shop.release(1);
    assert_eq!(second.await, Load::Failed);
    shop.release(0);
    assert_eq!(first.await, Load::Stale);

    assert_eq!(detail.product(), None);
}

#[tokio::test]
async fn test_modal_adds_from_the_shown_product() {
    let (_shop, notifier, store) = setup();
    let mut modal = ProductModal::new();
    assert_eq!(modal.add_to_cart(&store).await, Err(ShopError::NoProduct));

    modal.open(product("2", "Black tea", 250));
    modal.select_quantity(3).unwrap();
    modal.add_to_cart(&store).await.unwrap();

    assert!(modal.is_open());
    let rows = store.snapshot().rows();
    assert_eq!(rows[0].product_id.as_str(), "2");
    assert_eq!(rows[0].qty.get(), 3);
    assert_eq!(notifier.notices().last().map(|n| n.message.clone()), Some("Added to cart".into()));
}
