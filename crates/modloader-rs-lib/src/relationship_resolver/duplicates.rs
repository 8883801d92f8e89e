use std::collections::BTreeMap;

use super::*;

impl ResolutionSession<'_> {
	/// Keeps one package per key, the one preferred by [`PackageDescriptor::cmp_preference()`].
	///
	/// On a full tie the package sorted first is kept.
	pub(super) fn remove_duplicates(&mut self) {
		let mut groups = BTreeMap::<PackageKey, Vec<PackageId>>::new();
		for id in &self.enabled {
			groups.entry(self.packages[id.index()].key().clone()).or_default().push(*id);
		}

		for (key, group) in groups {
			if group.len() < 2 { continue; }

			let mut best = group[0];
			for candidate in &group[1..] {
				if self.packages[candidate.index()].cmp_preference(&self.packages[best.index()]).is_gt() {
					best = *candidate;
				}
			}

			log::debug!("{} packages share the key \"{}\", keeping {}", group.len(), key, self.packages[best.index()]);
			let notice = Notice::duplicate(best, &self.packages[best.index()]);
			for id in group {
				if id != best {
					self.disable(id, notice.clone());
				}
			}
		}
	}
}
