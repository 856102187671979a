//! Application components and pages.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use shop_client::{ApiConfig, ShopClient};
use shop_commerce::{CartItemId, Product, ProductId, Quantity};
use shop_state::{
    quick_add, submit_order, CartSnapshot, CartStore, CheckoutForm, Field, Load, ProductList,
    ProductModal, Route,
};

use crate::notifier::AlertNotifier;

type Store = CartStore<ShopClient>;

/// Handles shared by every page.
#[derive(Clone, Copy)]
struct Shop {
    store: StoredValue<Store, LocalStorage>,
    detail: StoredValue<Rc<shop_state::ProductDetail>, LocalStorage>,
    cart: RwSignal<CartSnapshot>,
}

impl Shop {
    fn store(&self) -> Store {
        self.store.get_value()
    }
}

fn use_shop() -> Shop {
    expect_context::<Shop>()
}

fn current_route() -> Route {
    let hash = window().location().hash().unwrap_or_default();
    Route::parse(&hash)
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    let config = match ApiConfig::from_build_env() {
        Ok(config) => config,
        Err(err) => return view! { <ConfigMissing message=err.to_string()/> }.into_any(),
    };

    let store = CartStore::new(
        Rc::new(ShopClient::from_config(&config)),
        Rc::new(AlertNotifier),
    );
    let cart = RwSignal::new(CartSnapshot::default());
    store.subscribe(move |snapshot| cart.set(snapshot.clone()));

    provide_context(Shop {
        store: StoredValue::new_local(store.clone()),
        detail: StoredValue::new_local(Rc::new(shop_state::ProductDetail::new())),
        cart,
    });

    spawn_local(async move {
        let _ = store.refresh().await;
    });

    let route = RwSignal::new(current_route());
    // Lives as long as the page; the handle is never removed.
    let _hashchange =
        window_event_listener(leptos::ev::hashchange, move |_| route.set(current_route()));

    view! {
        <Header route=route/>
        <main>
            {move || match route.get() {
                Route::Home => view! { <HomePage/> }.into_any(),
                Route::Products => view! { <ProductsPage/> }.into_any(),
                Route::ProductDetail(id) => view! { <ProductPage id=id/> }.into_any(),
                Route::Cart => view! { <CartPage/> }.into_any(),
                Route::NotFound(path) => view! { <NotFound path=path/> }.into_any(),
            }}
        </main>
        <Footer/>
    }
    .into_any()
}

// ============================================================================
// Layout Components
// ============================================================================

fn is_active(current: &Route, target: &Route) -> bool {
    current == target
        || (matches!(target, Route::Products) && matches!(current, Route::ProductDetail(_)))
}

#[component]
fn Header(route: RwSignal<Route>) -> impl IntoView {
    let shop = use_shop();
    let count = move || shop.cart.with(|c| c.item_count());

    view! {
        <header>
            <h1>"Tea Shop"</h1>
            <nav>
                {Route::nav()
                    .into_iter()
                    .map(|target| {
                        let href = target.fragment();
                        let title = target.title();
                        let is_cart = target == Route::Cart;
                        view! {
                            <a href=href class:active=move || is_active(&route.get(), &target)>
                                {title}
                                {move || is_cart.then(|| format!(" ({})", count()))}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p style="text-align: center; color: #888;">"Tea Shop - Rust + WASM"</p>
        </footer>
    }
}

#[component]
fn ConfigMissing(message: String) -> impl IntoView {
    view! {
        <div style="padding: 4rem; text-align: center;">
            <h1>"Shop is not configured"</h1>
            <p>{message}</p>
            <p style="color: #888;">"Rebuild with SHOP_BASE_URL and SHOP_API_PATH set."</p>
        </div>
    }
}

// ============================================================================
// Pages
// ============================================================================

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h2>"Welcome to the Tea Shop"</h2>
            <p>"Loose leaf teas, packed to order."</p>
            <a href=Route::Products.fragment() class="btn" style="margin-top: 1rem; display: inline-block;">
                "Browse Products"
            </a>
        </div>
    }
}

/// Product list with quick add and the "see more" modal.
#[component]
fn ProductsPage() -> impl IntoView {
    let shop = use_shop();
    let products = RwSignal::new(Vec::<Product>::new());
    let modal = RwSignal::new(ProductModal::new());

    let store = shop.store();
    spawn_local(async move {
        let list = ProductList::new();
        if list.mount(store.api(), store.notifier()).await == Load::Applied {
            let _ = products.try_set(list.products());
        }
    });

    view! {
        <h2>"All Products"</h2>
        <div class="products">
            {move || {
                products
                    .get()
                    .into_iter()
                    .map(|product| view! { <ProductCard product=product modal=modal/> })
                    .collect_view()
            }}
        </div>
        <ProductModalView modal=modal/>
    }
}

/// Single product page.
#[component]
fn ProductPage(id: ProductId) -> impl IntoView {
    let shop = use_shop();
    let product = RwSignal::new(None::<Product>);
    let status = RwSignal::new(None::<Load>);
    let qty = RwSignal::new(Quantity::ONE);

    let store = shop.store();
    let detail = shop.detail.get_value();
    spawn_local(async move {
        let load = detail.mount(store.api(), store.notifier(), &id).await;
        if load != Load::Stale {
            let _ = product.try_set(detail.product());
            let _ = status.try_set(Some(load));
        }
    });

    let add = move |_| {
        let store = shop.store();
        let detail = shop.detail.get_value();
        spawn_local(async move {
            let _ = detail.add_to_cart(&store).await;
        });
    };

    view! {
        {move || match (status.get(), product.get()) {
            (None, _) => view! { <p>"Loading..."</p> }.into_any(),
            (Some(_), Some(p)) => view! {
                <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 2rem;">
                    <img src=p.image_url.clone() alt=p.title.clone() style="width: 100%; border-radius: 8px;"/>
                    <div>
                        <h1>{p.title.clone()}</h1>
                        <p style="color: #888;">{p.category.clone()}</p>
                        <p style="margin: 1rem 0;">
                            <span class="price" style="font-size: 2rem;">{p.price_display()}</span>
                            {p.is_discounted().then(|| view! {
                                <span class="origin-price">{p.origin_price_display()}</span>
                            })}
                            " / " {p.unit.clone()}
                        </p>
                        <p style="color: #666;">{p.description.clone()}</p>
                        <p style="color: #666; margin-bottom: 2rem;">{p.content.clone()}</p>
                        <QuantitySelect
                            value=qty
                            on_select=move |n: u32| {
                                shop.detail.with_value(|d| {
                                    if let Ok(q) = d.select_quantity(n) {
                                        qty.set(q);
                                    }
                                })
                            }
                        />
                        <button class="btn" on:click=add>"Add to cart"</button>
                    </div>
                </div>
            }.into_any(),
            (Some(Load::NotFound), None) => view! {
                <p>"Product not found"</p>
                <a href=Route::Products.fragment()>"Back to products"</a>
            }.into_any(),
            (Some(_), None) => view! {
                <p>"Product unavailable"</p>
                <a href=Route::Products.fragment()>"Back to products"</a>
            }.into_any(),
        }}
    }
}

#[derive(Clone)]
enum CartOp {
    Inc(CartItemId),
    Dec(CartItemId),
    Remove(CartItemId),
    Clear,
}

fn spawn_cart(shop: Shop, op: CartOp) {
    let store = shop.store();
    spawn_local(async move {
        let result = match op {
            CartOp::Inc(line) => store.increment(&line).await,
            CartOp::Dec(line) => store.decrement(&line).await,
            CartOp::Remove(line) => store.remove_item(&line).await,
            CartOp::Clear => store.clear().await,
        };
        if let Err(err) = result {
            leptos::logging::log!("cart action failed: {err}");
        }
    });
}

/// Cart lines plus the checkout form.
#[component]
fn CartPage() -> impl IntoView {
    let shop = use_shop();
    let store = shop.store();
    spawn_local(async move {
        let _ = store.refresh().await;
    });

    view! {
        <h2>"Shopping Cart"</h2>
        {move || {
            if shop.cart.with(|c| c.is_empty()) {
                view! {
                    <p>"Your cart is empty."</p>
                    <a href=Route::Products.fragment()>"Continue shopping"</a>
                }
                .into_any()
            } else {
                view! { <CartTable/> }.into_any()
            }
        }}
        <CheckoutPanel/>
    }
}

#[component]
fn NotFound(path: String) -> impl IntoView {
    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>"404"</h1>
            <p>"Page not found: " {path}</p>
            <a href=Route::Home.fragment()>"Back to Home"</a>
        </div>
    }
}

// ============================================================================
// Product Components
// ============================================================================

#[component]
fn ProductCard(product: Product, modal: RwSignal<ProductModal>) -> impl IntoView {
    let shop = use_shop();
    let id = product.id.clone();
    let href = product.detail_fragment();
    let title = product.title.clone();
    let image = product.image_url.clone();
    let price = product.price_display();
    let origin = product.is_discounted().then(|| product.origin_price_display());

    let add = move |_| {
        let store = shop.store();
        let id = id.clone();
        spawn_local(async move {
            let _ = quick_add(&store, &id).await;
        });
    };
    let see_more = move |_| modal.update(|m| m.open(product.clone()));

    view! {
        <div class="product-card">
            <img src=image alt=title.clone()/>
            <div class="product-info">
                <h3>{title}</h3>
                <p>
                    <span class="price">{price}</span>
                    {origin.map(|o| view! { <span class="origin-price">{o}</span> })}
                </p>
                <a href=href>"View details"</a>
                <div style="margin-top: 0.5rem; display: flex; gap: 0.5rem;">
                    <button class="btn secondary" on:click=see_more>"See more"</button>
                    <button class="btn" on:click=add>"Add to cart"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProductModalView(modal: RwSignal<ProductModal>) -> impl IntoView {
    let shop = use_shop();
    let add = move |_| {
        let current = modal.get_untracked();
        let store = shop.store();
        spawn_local(async move {
            let _ = current.add_to_cart(&store).await;
        });
    };
    let close = move |_| modal.update(|m| m.close());

    move || {
        let product = modal.with(|m| m.product().filter(|_| m.is_open()).cloned())?;
        Some(view! {
            <div class="modal-backdrop">
                <div class="modal">
                    <h3>{product.title.clone()}</h3>
                    <img src=product.image_url.clone() alt=product.title.clone() style="width: 100%;"/>
                    <p>{product.description.clone()}</p>
                    <p class="price">{product.price_display()} " / " {product.unit.clone()}</p>
                    <QuantitySelect
                        value=Signal::derive(move || modal.with(|m| m.quantity()))
                        on_select=move |n: u32| modal.update(|m| {
                            let _ = m.select_quantity(n);
                        })
                    />
                    <div style="margin-top: 1rem; display: flex; gap: 0.5rem;">
                        <button class="btn" on:click=add>"Add to cart"</button>
                        <button class="btn secondary" on:click=close>"Close"</button>
                    </div>
                </div>
            </div>
        })
    }
}

/// The 1-10 quantity dropdown.
#[component]
fn QuantitySelect(
    #[prop(into)] value: Signal<Quantity>,
    #[prop(into)] on_select: Callback<u32>,
) -> impl IntoView {
    view! {
        <label>
            "Quantity "
            <select on:change=move |ev| {
                if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                    on_select.run(n);
                }
            }>
                {Quantity::selector_options()
                    .map(|q| {
                        view! {
                            <option value=q.get().to_string() selected=move || value.get() == q>
                                {q.get()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

// ============================================================================
// Cart Components
// ============================================================================

#[component]
fn CartTable() -> impl IntoView {
    let shop = use_shop();

    view! {
        <div style="max-width: 720px;">
            {move || {
                shop.cart
                    .with(|c| c.rows())
                    .into_iter()
                    .map(|row| {
                        let dec = row.id.clone();
                        let inc = row.id.clone();
                        let remove = row.id.clone();
                        view! {
                            <div class="cart-row">
                                <img src=row.image_url.clone() alt=row.title.clone() width="64"/>
                                <strong>{row.title.clone()}</strong>
                                <div>
                                    <button
                                        class="btn secondary"
                                        disabled=!row.can_decrement
                                        on:click=move |_| spawn_cart(shop, CartOp::Dec(dec.clone()))
                                    >
                                        "-"
                                    </button>
                                    <span style="margin: 0 0.5rem;">{row.qty.get()} " " {row.unit.clone()}</span>
                                    <button
                                        class="btn secondary"
                                        on:click=move |_| spawn_cart(shop, CartOp::Inc(inc.clone()))
                                    >
                                        "+"
                                    </button>
                                </div>
                                <span>{row.total.display()}</span>
                                <button
                                    class="btn secondary"
                                    on:click=move |_| spawn_cart(shop, CartOp::Remove(remove.clone()))
                                >
                                    "Remove"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <div class="cart-row" style="font-size: 1.25rem;">
                <strong>"Total"</strong>
                <strong>{move || shop.cart.with(|c| c.final_total().display())}</strong>
            </div>
            <button class="btn secondary" on:click=move |_| spawn_cart(shop, CartOp::Clear)>
                "Clear cart"
            </button>
        </div>
    }
}

/// Recipient form. Submitting waits for the order before clearing anything.
#[component]
fn CheckoutPanel() -> impl IntoView {
    let shop = use_shop();
    let form = RwSignal::new(CheckoutForm::new());
    let submitting = RwSignal::new(false);
    let can_submit = move || {
        !submitting.get() && form.with(|f| f.can_submit(shop.cart.with(|c| c.is_empty())))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut current = form.get_untracked();
        let store = shop.store();
        submitting.set(true);
        spawn_local(async move {
            let result = submit_order(&mut current, &store).await;
            let _ = form.try_set(current);
            let _ = submitting.try_set(false);
            if let Ok(receipt) = result {
                leptos::logging::log!("order {} placed", receipt.order_id);
            }
        });
    };

    view! {
        <form on:submit=on_submit style="max-width: 480px; margin-top: 2rem;">
            <h3>"Recipient"</h3>
            <fieldset disabled=move || submitting.get() style="border: none; padding: 0;">
                {Field::ALL
                    .into_iter()
                    .map(|field| view! { <FormField field=field form=form/> })
                    .collect_view()}
            </fieldset>
            <button type="submit" class="btn" disabled=move || !can_submit()>
                {move || if submitting.get() { "Sending..." } else { "Place order" }}
            </button>
        </form>
    }
}

#[component]
fn FormField(field: Field, form: RwSignal<CheckoutForm>) -> impl IntoView {
    let id = format!("checkout-{}", field.as_str());
    let label = if field.is_required() {
        field.display_name().to_string()
    } else {
        format!("{} (optional)", field.display_name())
    };
    let value = move || form.with(|f| f.value(field).to_string());
    let error = move || form.with(|f| f.error(field));

    let input = if field == Field::Message {
        view! {
            <textarea
                id=id.clone()
                name=field.as_str()
                rows="3"
                prop:value=value
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                on:blur=move |_| form.update(|f| f.touch(field))
            ></textarea>
        }
        .into_any()
    } else {
        let kind = match field {
            Field::Email => "email",
            Field::Tel => "tel",
            _ => "text",
        };
        view! {
            <input
                id=id.clone()
                name=field.as_str()
                type=kind
                prop:value=value
                class:is-invalid=move || error().is_some()
                on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                on:blur=move |_| form.update(|f| f.touch(field))
            />
        }
        .into_any()
    };

    view! {
        <div class="form-field">
            <label for=id>{label}</label>
            {input}
            <span class="field-error">{error}</span>
        </div>
    }
}
