#[inline(always)]
pub fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    let ra = a();
    (ra, b())
}

#[inline(always)]
pub fn par_map<T, F>(data: &mut [T], func: &F)
where
    F: Fn(usize, &mut T),
{
    for (index, output) in data.iter_mut().enumerate() {
        func(index, output);
    }
}

#[inline(always)]
pub fn par_chunks_mut<T, F>(data: &mut [T], func: &F, chunk_size: usize)
where
    F: Fn(usize, &mut [T]),
{
    for (chunk_id, chunk) in data.chunks_mut(chunk_size.max(1)).enumerate() {
        func(chunk_id, chunk);
    }
}

#[inline(always)]
pub fn par_chunks<T, F>(data: &[T], func: &F, chunk_size: usize)
where
    F: Fn(usize, &[T]),
{
    for (chunk_id, chunk) in data.chunks(chunk_size.max(1)).enumerate() {
        func(chunk_id, chunk);
    }
}
