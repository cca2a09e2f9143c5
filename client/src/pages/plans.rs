//! Subscription plan overview.

#[cfg(test)]
#[path = "plans_test.rs"]
mod plans_test;

use leptos::prelude::*;
use leptos_router::components::A;

/// A subscription tier offered at signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Value sent as `subscriptionPlan`.
    pub id: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
}

/// Plans in display order; the first is the signup default.
pub static PLANS: [Plan; 3] = [
    Plan {
        id: "free",
        title: "Free",
        price: "$0 / month",
        features: &["50 short links per month", "Basic click counts"],
    },
    Plan {
        id: "pro",
        title: "Pro",
        price: "$9 / month",
        features: &["Unlimited short links", "Custom aliases", "Detailed click statistics"],
    },
    Plan {
        id: "business",
        title: "Business",
        price: "$29 / month",
        features: &["Everything in Pro", "Team accounts", "Priority support"],
    },
];

pub fn default_plan() -> &'static Plan {
    &PLANS[0]
}

pub fn plan_by_id(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id == id)
}

#[component]
pub fn PlansPage() -> impl IntoView {
    view! {
        <section class="plans-page">
            <h1>"Plans"</h1>
            <div class="plans-grid">
                {PLANS
                    .iter()
                    .map(|plan| {
                        view! {
                            <article class="plan-card">
                                <h2>{plan.title}</h2>
                                <p class="plan-card__price">{plan.price}</p>
                                <ul>
                                    {plan.features.iter().map(|feature| view! { <li>{*feature}</li> }).collect_view()}
                                </ul>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
            <A href="/signup">"Get started"</A>
        </section>
    }
}
