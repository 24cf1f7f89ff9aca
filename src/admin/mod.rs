// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod entities;
pub mod handlers;
pub mod middleware;
pub mod registry;
pub mod shared;
pub mod tags;
pub mod taxonomies;

pub use handlers::configure;
pub use registry::{AdminRegistry, build_default_registry};
