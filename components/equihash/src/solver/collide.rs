//! Generations `1..=k`: pairing up values that collide on the next window.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use super::{reconstruct, Solver, Submitter, SUB_BUCKET_CAPACITY};
use crate::Error;

impl Solver {
    /// Computes `generation` from the values of `generation - 1`.
    ///
    /// Each L1 bucket is walked in reverse insertion order. Values are grouped by their
    /// L2 key, and every value is paired with the values of its group seen before it,
    /// most recent first. On the final generation a pair must also collide on the last
    /// window, and is then resolved into a solution instead of being stored.
    pub(super) fn collide<S: Submitter + ?Sized>(
        &mut self,
        generation: u32,
        submitter: &mut S,
    ) -> Result<ControlFlow<()>, Error> {
        let Solver {
            params,
            even,
            odd,
            tree,
            block,
            sub_counts,
            sub_slots,
            indices,
            solutions,
            ..
        } = self;
        let p = *params;

        let (from, to) = if generation % 2 == 1 {
            (&*even, odd)
        } else {
            (&*odd, even)
        };
        debug_assert_eq!(from.generation() + 1, generation);

        let last = generation == p.k;
        let words = p.value_words(generation - 1);
        let backref = words - 1;
        let tail = words - 2;
        let l2_bits = p.l2_bits();
        let l2_mask = (1 << l2_bits) - 1;
        if !last {
            to.reset(generation, p.value_words(generation));
        }

        for bucket in 0..p.l1_buckets() {
            sub_counts.iter_mut().for_each(|c| *c = 0);

            for ia in (0..from.len(bucket)).rev() {
                let a = from.value(bucket, ia);
                let key = (a[0] & l2_mask) as usize;
                let group =
                    &mut sub_slots[key * SUB_BUCKET_CAPACITY..(key + 1) * SUB_BUCKET_CAPACITY];
                let count = usize::from(sub_counts[key]);

                for &ib in group[..count].iter().rev() {
                    let b = from.value(bucket, ib as usize);

                    if last {
                        if a[1] != b[1] {
                            continue;
                        }
                        if !reconstruct::resolve_pair(
                            tree,
                            generation,
                            a[backref],
                            b[backref],
                            indices,
                        ) {
                            trace!(bucket, "discarded solution with duplicate indices");
                            continue;
                        }

                        *solutions += 1;
                        block.write_solution(&p, indices);
                        debug!(solution = *solutions, first = indices[0], "found solution");
                        if submitter.submit(block, indices) {
                            return Ok(ControlFlow::Break(()));
                        }
                    } else {
                        // Equal tails usually mean the two values share their ancestry.
                        if a[tail] == b[tail] {
                            continue;
                        }

                        let id = tree
                            .push(a[backref], b[backref])
                            .ok_or(Error::TreeOverflow { generation })?;
                        let slot = to.insert(((a[1] ^ b[1]) >> l2_bits) as usize)?;
                        for (s, (x, y)) in slot
                            .iter_mut()
                            .zip(a[1..backref].iter().zip(&b[1..backref]))
                        {
                            *s = x ^ y;
                        }
                        slot[words - 2] = id;
                    }
                }

                if count == SUB_BUCKET_CAPACITY {
                    return Err(Error::SubBucketOverflow { generation, bucket });
                }
                group[count] = ia as u32;
                sub_counts[key] += 1;
            }
        }

        if last {
            debug!(generation, solutions = *solutions, "finished final generation");
        } else {
            debug!(
                generation,
                values = to.occupancy(),
                tree = tree.len(),
                "finished generation"
            );
        }
        Ok(ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use assert_matches::assert_matches;

    use crate::solver::{Block, Solver, State};
    use crate::{Error, Params};

    #[test]
    fn merged_values_are_xors_of_their_parents() {
        let p = Params::solver(48, 5).unwrap();
        let mut solver = Solver::new(p);
        solver.generate(b"collisions").unwrap();
        let mut never = |_: &Block, _: &[u32]| -> bool { unreachable!() };
        assert_eq!(solver.advance(1, &mut never), Ok(ControlFlow::Continue(())));
        assert_eq!(solver.advance(2, &mut never), Ok(ControlFlow::Continue(())));
        assert_eq!(solver.state(), State::Ready(2));

        // Generation 2 lives in the even store; its parents were overwritten, so check
        // it against generation 0 through the tree instead.
        let gen2 = &solver.even;
        assert_eq!(gen2.generation(), 2);
        assert!(gen2.occupancy() > 0);
        assert_eq!(gen2.occupancy() + solver.odd.occupancy(), solver.tree.len());

        let mut check = Solver::new(p);
        check.generate(b"collisions").unwrap();
        let leaf = |index: u32| -> Vec<u32> {
            (0..p.l1_buckets())
                .flat_map(|bucket| (0..check.even.len(bucket)).map(move |i| (bucket, i)))
                .map(|(bucket, i)| check.even.value(bucket, i))
                .find(|v| v[6] == index)
                .unwrap()
                .to_vec()
        };

        for bucket in 0..p.l1_buckets() {
            for i in 0..gen2.len(bucket) {
                let value = gen2.value(bucket, i);
                assert_eq!(value.len(), 5);

                let [x, y] = solver.tree.get(value[4]);
                let mut xor = vec![0; 6];
                for r in [x, y] {
                    let [l, r] = solver.tree.get(r);
                    for index in [l, r] {
                        for (acc, w) in xor.iter_mut().zip(leaf(index)) {
                            *acc ^= w;
                        }
                    }
                }
                assert_eq!(xor[..2], [0, 0]);
                assert_eq!(xor[2..], value[..4]);
            }
        }
    }

    #[test]
    fn crowded_sub_bucket_abandons_the_attempt() {
        let p = Params::solver(48, 5).unwrap();
        let mut solver = Solver::new(p);
        let mut never = |_: &Block, _: &[u32]| -> bool { unreachable!() };
        solver.generate(b"crowded").unwrap();

        // Seventeen values sharing one L2 key.
        solver.even.reset(0, p.value_words(0));
        for i in 0..17 {
            let slot = solver.even.insert(0).unwrap();
            slot[..6].fill(0);
            slot[6] = i;
        }
        assert_eq!(
            solver.advance(1, &mut never),
            Err(Error::SubBucketOverflow {
                generation: 1,
                bucket: 0
            })
        );
        assert_eq!(solver.state(), State::Idle);
        assert_matches!(solver.advance(1, &mut never), Err(Error::NotGenerated));

        // The next input starts from a clean slate.
        solver.generate(b"next").unwrap();
        assert_eq!(solver.state(), State::Ready(0));
        assert_eq!(solver.advance(1, &mut never), Ok(ControlFlow::Continue(())));
    }

    #[test]
    fn full_tree_abandons_the_attempt() {
        let p = Params::solver(48, 5).unwrap();
        let mut solver = Solver::new(p);
        let mut never = |_: &Block, _: &[u32]| -> bool { unreachable!() };
        solver.generate(b"collisions").unwrap();
        while solver.tree.push(0, 1).is_some() {}

        assert_eq!(
            solver.advance(1, &mut never),
            Err(Error::TreeOverflow { generation: 1 })
        );
        assert_eq!(solver.state(), State::Idle);

        solver.generate(b"collisions").unwrap();
        assert_eq!(solver.tree.len(), 0);
        assert_eq!(solver.advance(1, &mut never), Ok(ControlFlow::Continue(())));
        assert!(solver.tree.len() > 0);
    }
}
