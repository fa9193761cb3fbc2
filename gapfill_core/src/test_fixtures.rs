//! Small hand-built networks shared by the unit tests
//!
//! ```text
//!  a_e --R_tA--> a_c --R1--> b_c --R2--> c_c --+
//!                 |           ^   \            +--biomass--> Biomass
//!                 RA          |    R3--> d_c --+
//!                 v           |
//!                k_c ---RK----+
//!                 ^           |
//!                 RE          RE1
//!                 |           |
//!  e_e --R_tE--> e_c ---------+
//!
//!  x_c <--Z1,Z2,Z3--> y_c   (disconnected)
//! ```
use indexmap::{IndexMap, IndexSet};

use crate::metabolic_model::compound::{Compound, Location};
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionDirection};
use crate::metabolic_model::store::{Complex, ModelStore};

pub(crate) fn side(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
    entries.iter().map(|(c, v)| (c.to_string(), *v)).collect()
}

pub(crate) fn ids(ids: &[&str]) -> IndexSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn simple(id: &str, from: &str, to: &str, direction: ReactionDirection) -> Reaction {
    ReactionBuilder::default()
        .id(id)
        .direction(direction)
        .left(side(&[(from, 1.)]))
        .right(side(&[(to, 1.)]))
        .build()
        .unwrap()
}

pub(crate) fn toy_store() -> ModelStore {
    let mut store = ModelStore::new_empty();
    for id in ["a_e", "e_e"] {
        store.add_compound(Compound::new(id, id, Some(Location::Extracellular)));
    }
    for id in ["a_c", "b_c", "c_c", "d_c", "e_c", "k_c", "x_c", "y_c"] {
        store.add_compound(Compound::new(id, id, Some(Location::Cytoplasm)));
    }
    store.add_compound(Compound::new("Biomass", "Biomass", Some(Location::Boundary)));

    let mut transport_a = simple("R_tA", "a_e", "a_c", ReactionDirection::Forward);
    transport_a.is_transport = true;
    transport_a.linked.insert("R1".to_string());
    store.add_reaction(transport_a);
    let mut transport_e = simple("R_tE", "e_e", "e_c", ReactionDirection::Forward);
    transport_e.is_transport = true;
    store.add_reaction(transport_e);

    let mut r1 = simple("R1", "a_c", "b_c", ReactionDirection::Forward);
    r1.ec_numbers.push("1.1.1.1".to_string());
    store.add_reaction(r1);
    let mut r2 = simple("R2", "b_c", "c_c", ReactionDirection::Forward);
    r2.ec_numbers.push("1.1.1.3".to_string());
    store.add_reaction(r2);
    let mut r3 = simple("R3", "b_c", "d_c", ReactionDirection::Forward);
    r3.ec_numbers.push("1.1.1.4".to_string());
    store.add_reaction(r3);

    store.add_reaction(simple("RE1", "e_c", "b_c", ReactionDirection::Forward));
    store.add_reaction(simple("RA", "a_c", "k_c", ReactionDirection::Forward));
    store.add_reaction(simple("RE", "e_c", "k_c", ReactionDirection::Forward));
    store.add_reaction(simple("RK", "k_c", "b_c", ReactionDirection::Forward));

    store.add_reaction(simple("Z1", "x_c", "y_c", ReactionDirection::Forward));
    store.add_reaction(simple("Z2", "y_c", "x_c", ReactionDirection::Forward));
    store.add_reaction(simple("Z3", "x_c", "y_c", ReactionDirection::Reversible));

    for (id, role, reaction) in [
        ("cpx1", "A to B converter (EC 1.1.1.1)", "R1"),
        ("cpx2", "Branch enzyme C (EC 1.1.1.3)", "R2"),
        ("cpx3", "Branch enzyme D (EC 1.1.1.4)", "R3"),
    ] {
        store.add_complex(Complex {
            id: id.to_string(),
            name: None,
            roles: ids(&[role]),
            reactions: ids(&[reaction]),
        });
    }
    store
}

pub(crate) fn toy_biomass() -> Reaction {
    ReactionBuilder::default()
        .id("BIOMASS_EQN")
        .name(Some("biomass_equation".to_string()))
        .direction(ReactionDirection::Forward)
        .left(side(&[("c_c", 1.), ("d_c", 1.)]))
        .right(side(&[("Biomass", 1.)]))
        .is_biomass(true)
        .build()
        .unwrap()
}

/// Medium providing `a_e`
pub(crate) fn positive_media() -> Media {
    Media::from_compounds(
        "A_only",
        [Compound::new("a_e", "a_e", Some(Location::Extracellular))],
    )
}

/// Medium providing `e_e`
pub(crate) fn negative_media() -> Media {
    Media::from_compounds(
        "E_only",
        [Compound::new("e_e", "e_e", Some(Location::Extracellular))],
    )
}

/// Medium providing a compound nothing in the store uses
pub(crate) fn barren_media() -> Media {
    Media::from_compounds(
        "barren",
        [Compound::new("w_e", "w_e", Some(Location::Extracellular))],
    )
}
